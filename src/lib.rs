//! Root crate facade for the PasteBox server.

pub use pastebox_server::{
    archive, config, create_app, db, detection, error, handlers, ids, models, serve_router,
    sweeper, AppError, AppState, Config, Database, HttpError, RetentionConfig, RetentionSweeper,
    SweeperHandle, SweeperState,
};
