//! ghostdrag demo entry point

use std::sync::OnceLock;
use zoon::*;

mod app;
mod test_api;

/// Stores the main application task handle to prevent it from being dropped.
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

pub fn main() {
    let handle = Task::start_droppable(async {
        let app = crate::app::DemoApp::new();

        test_api::store_test_api_state(app.state.clone());
        test_api::expose_ghostdrag_test_api();

        let root_element = app.root();
        start_app("app", move || root_element);
    });
    let _ = MAIN_TASK.set(handle);
}
