use crate::engine::loading::progress::LoadingProgress;
use crate::engine::xr::session::{XrSelectEvent, XrSessionEvent};
use crate::tour::state::TourState;
use crate::tour::trigger::{TourTriggerEvent, TriggerSource};
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, thiserror::Error)]
#[error("rpc error {code}: {message}")]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Something the host asked the viewer to do, applied as a Bevy event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    StartTour,
    XrSession(XrSessionEvent),
    XrSelect,
}

/// Read-only view of viewer state used to answer queries.
pub struct RpcContext<'a> {
    pub tour: &'a TourState,
    pub loading: &'a LoadingProgress,
    pub fps: f32,
}

/// Queues outgoing notifications and responses until the end of the frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Plugin establishing the host bridge.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // The JS callback and the frame loop share this queue.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
            return;
        }
    }

    // Hand the closure to JS so it outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw message text received from the host page.
#[derive(Event)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    tour: Res<TourState>,
    loading: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut tour_triggers: EventWriter<TourTriggerEvent>,
    mut sessions: EventWriter<XrSessionEvent>,
    mut selects: EventWriter<XrSelectEvent>,
) {
    let context = RpcContext {
        tour: &tour,
        loading: &loading,
        fps: current_fps(&diagnostics),
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Processing method: {}", request.method)
                    }),
                );

                let mut host_commands = Vec::new();
                if let Some(response) = handle_rpc_request(&request, &context, &mut host_commands) {
                    rpc_interface.queue_response(response);
                }

                for command in host_commands {
                    match command {
                        HostCommand::StartTour => {
                            tour_triggers.write(TourTriggerEvent {
                                source: TriggerSource::HostPage,
                            });
                        }
                        HostCommand::XrSession(event) => {
                            sessions.write(event);
                        }
                        HostCommand::XrSelect => {
                            selects.write(XrSelectEvent);
                        }
                    }
                }
            }
            Err(parse_error) => {
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

fn current_fps(diagnostics: &DiagnosticsStore) -> f32 {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32
}

/// Run one request. Side effects are pushed onto `host_commands`; a response
/// is returned only for requests that carry an ID.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    host_commands: &mut Vec<HostCommand>,
) -> Option<RpcResponse> {
    let id = request.id.clone();

    if request.jsonrpc != "2.0" {
        return id.map(|id| {
            create_error_response(id, -32600, "Invalid request", Some(serde_json::json!({
                "jsonrpc": request.jsonrpc
            })))
        });
    }

    let result = match request.method.as_str() {
        "start_tour" => handle_start_tour(context, host_commands),
        "get_tour_state" => Ok(tour_state_json(context.tour)),
        "get_loading_progress" => Ok(context.loading.to_json()),
        "get_fps" => Ok(serde_json::json!({ "fps": context.fps })),
        "xr_session" => handle_xr_session(&request.params, host_commands),
        "xr_select" => {
            host_commands.push(HostCommand::XrSelect);
            Ok(serde_json::json!({ "success": true }))
        }
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return id.map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    // Notifications get no reply.
    let id = id?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_start_tour(
    context: &RpcContext,
    host_commands: &mut Vec<HostCommand>,
) -> Result<serde_json::Value, RpcError> {
    // Triggers are only read once every narration clip has settled.
    if !context.loading.narration_ready {
        return Err(RpcError::internal_error("Scene is still loading"));
    }
    if !context.tour.manual_control_enabled() {
        return Ok(serde_json::json!({
            "accepted": false,
            "state": context.tour.label()
        }));
    }

    host_commands.push(HostCommand::StartTour);
    info!("Tour start requested by host page");
    Ok(serde_json::json!({ "accepted": true }))
}

fn handle_xr_session(
    params: &serde_json::Value,
    host_commands: &mut Vec<HostCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct XrSessionParams {
        state: String,
    }

    let session_params = serde_json::from_value::<XrSessionParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'state' parameter"))?;

    let event = match session_params.state.as_str() {
        "start" => XrSessionEvent::Started,
        "end" => XrSessionEvent::Ended,
        other => {
            return Err(RpcError::invalid_params(&format!(
                "Unknown session state: {}",
                other
            )));
        }
    };
    host_commands.push(HostCommand::XrSession(event));

    Ok(serde_json::json!({
        "success": true,
        "state": session_params.state
    }))
}

/// Payload shared by `get_tour_state` and `tour_state_changed`.
pub fn tour_state_json(tour: &TourState) -> serde_json::Value {
    serde_json::json!({
        "state": tour.label(),
        "manual_control": tour.manual_control_enabled(),
        "target": tour.current_target(),
        "phase": tour.phase().map(|phase| format!("{:?}", phase)),
    })
}

fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::plan::TourPlan;
    use crate::tour::state::ActiveTour;

    fn request(json: &str) -> RpcRequest {
        serde_json::from_str(json).unwrap()
    }

    fn loaded() -> LoadingProgress {
        LoadingProgress {
            manifest_loaded: true,
            narration_ready: true,
            ..default()
        }
    }

    fn dispatch(tour: &TourState, json: &str) -> (Option<RpcResponse>, Vec<HostCommand>) {
        dispatch_while(&loaded(), tour, json)
    }

    fn dispatch_while(
        loading: &LoadingProgress,
        tour: &TourState,
        json: &str,
    ) -> (Option<RpcResponse>, Vec<HostCommand>) {
        let context = RpcContext {
            tour,
            loading,
            fps: 60.0,
        };
        let mut commands = Vec::new();
        let response = handle_rpc_request(&request(json), &context, &mut commands);
        (response, commands)
    }

    #[test]
    fn start_tour_is_forwarded_when_idle() {
        let (response, commands) = dispatch(
            &TourState::Idle,
            r#"{"jsonrpc":"2.0","method":"start_tour","params":{},"id":1}"#,
        );
        assert_eq!(commands, vec![HostCommand::StartTour]);
        let result = response.unwrap().result.unwrap();
        assert_eq!(result["accepted"], true);
    }

    #[test]
    fn start_tour_is_refused_until_narration_is_ready() {
        let loading = LoadingProgress {
            manifest_loaded: true,
            narration_ready: false,
            ..default()
        };
        let (response, commands) = dispatch_while(
            &loading,
            &TourState::Idle,
            r#"{"jsonrpc":"2.0","method":"start_tour","id":7}"#,
        );
        assert!(commands.is_empty());
        let response = response.unwrap();
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, -32603);
    }

    #[test]
    fn start_tour_is_declined_while_running() {
        let running = TourState::Running(ActiveTour::new(TourPlan {
            waypoints: Vec::new(),
            steps: Vec::new(),
            skipped: Vec::new(),
        }));
        let (response, commands) = dispatch(
            &running,
            r#"{"jsonrpc":"2.0","method":"start_tour","id":"a"}"#,
        );
        assert!(commands.is_empty());
        assert_eq!(response.unwrap().result.unwrap()["accepted"], false);
    }

    #[test]
    fn xr_session_requires_a_known_state() {
        let (response, commands) = dispatch(
            &TourState::Idle,
            r#"{"jsonrpc":"2.0","method":"xr_session","params":{"state":"start"},"id":2}"#,
        );
        assert_eq!(commands, vec![HostCommand::XrSession(XrSessionEvent::Started)]);
        assert!(response.unwrap().error.is_none());

        let (response, commands) = dispatch(
            &TourState::Idle,
            r#"{"jsonrpc":"2.0","method":"xr_session","params":{"mode":"vr"},"id":3}"#,
        );
        assert!(commands.is_empty());
        assert_eq!(response.unwrap().error.unwrap().code, -32602);
    }

    #[test]
    fn notifications_act_without_a_reply() {
        let (response, commands) = dispatch(
            &TourState::Idle,
            r#"{"jsonrpc":"2.0","method":"xr_select"}"#,
        );
        assert!(response.is_none());
        assert_eq!(commands, vec![HostCommand::XrSelect]);
    }

    #[test]
    fn unknown_methods_and_versions_are_rejected() {
        let (response, _) = dispatch(
            &TourState::Idle,
            r#"{"jsonrpc":"2.0","method":"warp_drive","id":4}"#,
        );
        assert_eq!(response.unwrap().error.unwrap().code, -32601);

        let (response, commands) = dispatch(
            &TourState::Idle,
            r#"{"jsonrpc":"1.0","method":"start_tour","id":5}"#,
        );
        assert!(commands.is_empty());
        assert_eq!(response.unwrap().error.unwrap().code, -32600);
    }

    #[test]
    fn tour_state_reports_idle() {
        let (response, _) = dispatch(
            &TourState::Idle,
            r#"{"jsonrpc":"2.0","method":"get_tour_state","id":6}"#,
        );
        let result = response.unwrap().result.unwrap();
        assert_eq!(result["state"], "idle");
        assert_eq!(result["manual_control"], true);
        assert!(result["target"].is_null());
    }
}
