//! # meow-server
//!
//! HTTP endpoint for the Meow add-on. The host platform posts a JSON event
//! to one route per trigger and renders the card JSON it gets back.
//!
//! | Route              | Trigger            | Response                  |
//! |--------------------|--------------------|---------------------------|
//! | `POST /homepage`   | homepage opened    | `pushCard`                |
//! | `POST /contextual` | contextual trigger | `pushCard`                |
//! | `POST /change-cat` | "Change cat" press | `renderActions/updateCard`|
//! | `GET /api/health`  | liveness probe     | `{"status": "ok"}`        |

mod error;
mod server;
pub mod workspace;

pub use error::ApiError;
pub use server::{router, AppState, SharedState};

use meow_core::MeowConfig;
use tracing::info;

/// Run the endpoint server
pub async fn run(config: MeowConfig) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", config.server.port);

    info!("Starting meow-server on {}", addr);
    info!("Button actions resolve against {}", config.server.public_url);

    println!("Meow add-on endpoint running at http://localhost:{}", config.server.port);
    println!("Press Ctrl+C to stop");

    server::serve(config, &addr).await
}
