// JSON encoding of everything that crosses the JNI boundary
//
// Requests arrive as a method name plus a JSON argument map, replies and
// events leave as JSON strings. The Java shim converts them to and from the
// host's own message types.

use videoplayer_core::{
    MethodCall, MethodResponse, Result, VendorEvent, VideoEvent, VideoPlayerPlugin,
};

/// Vendor callback kinds as passed by the Java listener shim
pub const KIND_PREPARED: i32 = 0;
pub const KIND_BUFFERING_UPDATE: i32 = 1;
pub const KIND_COMPLETION: i32 = 2;
pub const KIND_ERROR: i32 = 3;

/// Blank argument strings decode to `null` arguments.
pub fn decode_call(method: &str, arguments_json: &str) -> Result<MethodCall> {
    let arguments = if arguments_json.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(arguments_json)?
    };
    Ok(MethodCall::new(method, arguments))
}

pub fn encode_response(response: &MethodResponse) -> String {
    match serde_json::to_string(response) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to encode response: {}", e);
            serde_json::json!({
                "status": "error",
                "code": "codec_error",
                "message": e.to_string(),
            })
            .to_string()
        }
    }
}

pub fn encode_event(event: &VideoEvent) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

/// Decode, dispatch and encode one method call.
pub fn handle_method_call(
    plugin: &VideoPlayerPlugin,
    method: &str,
    arguments_json: &str,
) -> String {
    let response = match decode_call(method, arguments_json) {
        Ok(call) => plugin.on_method_call(&call),
        Err(e) => {
            log::error!("Malformed arguments for {}: {}", method, e);
            MethodResponse::from(e)
        }
    };
    encode_response(&response)
}

/// Map a raw vendor callback onto the event vocabulary.
pub fn vendor_event(kind: i32, arg1: i32, arg2: i32) -> Option<VendorEvent> {
    match kind {
        KIND_PREPARED => Some(VendorEvent::Prepared),
        KIND_BUFFERING_UPDATE => Some(VendorEvent::BufferingUpdate { percent: arg1 }),
        KIND_COMPLETION => Some(VendorEvent::Completion),
        KIND_ERROR => Some(VendorEvent::Error {
            what: arg1,
            extra: arg2,
        }),
        _ => None,
    }
}
