//! Database integration tests.

use super::*;
use crate::error::AppError;
use crate::test_support::{files, setup_temp_db};
use chrono::{Duration, Utc};
use std::sync::{Arc, Barrier};
use std::thread;

mod basic_ops;
