//! JSON-RPC 2.0 bridge to the page hosting the viewer.
//!
//! Messages travel over `postMessage` between the viewer (usually inside an
//! iframe) and its parent window. On native builds the bridge is inert.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Viewer (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │ <───────────────── Response (with ID) ─┤
//!        ├─ Notification (no ID) ───────────────> │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Incoming Methods
//!
//! - `start_tour`: start the guided tour if manual control is enabled
//! - `get_tour_state`: idle/running, current target and phase
//! - `get_loading_progress`: manifest, model, clip and skybox progress
//! - `get_fps`: smoothed frame rate
//! - `xr_session`: `{"state": "start" | "end"}` from the host's headset session
//! - `xr_select`: controller select, usually sent as a notification
//!
//! ## Outgoing Notifications
//!
//! - `tour_state_changed`, `loading_progress`, `fps_update`, `debug_message`
//!
//! ## Error Codes
//!
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

/// Message types, the per-frame queue and method dispatch.
pub mod web_rpc;
