// JNI entry points for com.yourcompany.videoplayer.NativeBridge
//
// The Java shim owns the Flutter registrar. It forwards method calls as
// JSON, routes event-channel listen/cancel by channel name, and relays the
// KSY player's listener callbacks through `nativeOnPlayerEvent`.

mod host;
mod player;
mod sink;
mod vm;

use crate::codec::{handle_method_call, vendor_event};
use host::JniHost;
use jni::objects::{JClass, JObject, JString};
use jni::sys::{jboolean, jint, jlong, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use sink::JniEventSink;
use std::collections::HashMap;
use std::sync::Arc;
use videoplayer_core::{PluginConfig, StreamHandler, VendorListener, VideoPlayerPlugin};
use vm::{cache_vm, jstring_to_string};

static PLUGIN_REGISTRY: Lazy<Mutex<HashMap<i64, Arc<VideoPlayerPlugin>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));
static NEXT_PLUGIN_ID: Lazy<Mutex<i64>> = Lazy::new(|| Mutex::new(1));

static STREAM_HANDLERS: Lazy<Mutex<HashMap<String, Arc<dyn StreamHandler>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

static LISTENER_REGISTRY: Lazy<Mutex<HashMap<i64, Arc<dyn VendorListener>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));
static NEXT_LISTENER_ID: Lazy<Mutex<i64>> = Lazy::new(|| Mutex::new(1));

fn next_id(counter: &Mutex<i64>) -> i64 {
    let mut next = counter.lock();
    let id = *next;
    *next += 1;
    id
}

pub(crate) fn register_listener(listener: Arc<dyn VendorListener>) -> i64 {
    let id = next_id(&NEXT_LISTENER_ID);
    LISTENER_REGISTRY.lock().insert(id, listener);
    id
}

pub(crate) fn unregister_listener(id: i64) {
    LISTENER_REGISTRY.lock().remove(&id);
}

pub(crate) fn register_stream_handler(channel: &str, handler: Arc<dyn StreamHandler>) {
    STREAM_HANDLERS.lock().insert(channel.to_string(), handler);
}

pub(crate) fn unregister_stream_handler(channel: &str) {
    STREAM_HANDLERS.lock().remove(channel);
}

fn stream_handler(env: &mut JNIEnv, channel: &JString) -> Option<Arc<dyn StreamHandler>> {
    let name = match jstring_to_string(env, channel) {
        Ok(name) => name,
        Err(e) => {
            log::error!("Failed to read channel name: {}", e);
            return None;
        }
    };
    let handler = STREAM_HANDLERS.lock().get(&name).cloned();
    if handler.is_none() {
        log::warn!("No stream handler for channel {}", name);
    }
    handler
}

/// Create a plugin bound to the Java host object.
/// Returns a plugin ID (>0) for subsequent calls, -1 on error.
#[no_mangle]
pub extern "system" fn Java_com_yourcompany_videoplayer_NativeBridge_nativeCreate(
    mut env: JNIEnv,
    _class: JClass,
    host: JObject,
    config_json: JString,
) -> jlong {
    let config = match jstring_to_string(&mut env, &config_json) {
        Ok(json) => PluginConfig::from_json(&json),
        Err(e) => Err(vm::platform(e)),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            crate::init_logging(log::LevelFilter::Info);
            log::error!("Invalid plugin configuration: {}", e);
            return -1;
        }
    };
    crate::init_logging(config.log_level_filter());

    if let Err(e) = cache_vm(&env) {
        log::error!("Failed to cache JavaVM: {}", e);
        return -1;
    }
    let host = match env.new_global_ref(host) {
        Ok(host) => host,
        Err(e) => {
            log::error!("Failed to retain host object: {}", e);
            return -1;
        }
    };

    let plugin = VideoPlayerPlugin::new(Arc::new(JniHost::new(host)), config);
    let plugin_id = next_id(&NEXT_PLUGIN_ID);
    PLUGIN_REGISTRY.lock().insert(plugin_id, Arc::new(plugin));
    log::info!("Video player plugin created with ID: {}", plugin_id);
    plugin_id
}

/// Handle one method call; returns the JSON-encoded response.
#[no_mangle]
pub extern "system" fn Java_com_yourcompany_videoplayer_NativeBridge_nativeOnMethodCall(
    mut env: JNIEnv,
    _class: JClass,
    plugin_id: jlong,
    method: JString,
    arguments_json: JString,
) -> jstring {
    let plugin = PLUGIN_REGISTRY.lock().get(&plugin_id).cloned();
    let Some(plugin) = plugin else {
        log::error!("Invalid plugin ID: {}", plugin_id);
        return std::ptr::null_mut();
    };

    let request = jstring_to_string(&mut env, &method).and_then(|method| {
        jstring_to_string(&mut env, &arguments_json).map(|arguments| (method, arguments))
    });
    let (method, arguments) = match request {
        Ok(request) => request,
        Err(e) => {
            log::error!("Failed to read method call: {}", e);
            return std::ptr::null_mut();
        }
    };

    let reply = handle_method_call(&plugin, &method, &arguments);
    match env.new_string(reply) {
        Ok(reply) => reply.into_raw(),
        Err(e) => {
            log::error!("Failed to create reply string: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Dispose every session and drop the plugin.
#[no_mangle]
pub extern "system" fn Java_com_yourcompany_videoplayer_NativeBridge_nativeDestroy(
    _env: JNIEnv,
    _class: JClass,
    plugin_id: jlong,
) {
    let removed = PLUGIN_REGISTRY.lock().remove(&plugin_id);
    match removed {
        Some(plugin) => {
            plugin.shutdown();
            log::info!("Plugin {} destroyed", plugin_id);
        }
        None => log::error!("Invalid plugin ID: {}", plugin_id),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_yourcompany_videoplayer_NativeBridge_nativeOnListen(
    mut env: JNIEnv,
    _class: JClass,
    channel: JString,
    sink: JObject,
) {
    let Some(handler) = stream_handler(&mut env, &channel) else {
        return;
    };
    match env.new_global_ref(sink) {
        Ok(sink) => handler.on_listen(Arc::new(JniEventSink::new(sink))),
        Err(e) => log::error!("Failed to retain event sink: {}", e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_yourcompany_videoplayer_NativeBridge_nativeOnCancel(
    mut env: JNIEnv,
    _class: JClass,
    channel: JString,
) {
    if let Some(handler) = stream_handler(&mut env, &channel) {
        handler.on_cancel();
    }
}

/// Vendor listener callback. Returns true when the event was handled.
#[no_mangle]
pub extern "system" fn Java_com_yourcompany_videoplayer_NativeBridge_nativeOnPlayerEvent(
    _env: JNIEnv,
    _class: JClass,
    listener_id: jlong,
    kind: jint,
    arg1: jint,
    arg2: jint,
) -> jboolean {
    let Some(event) = vendor_event(kind, arg1, arg2) else {
        log::warn!("Unknown vendor event kind {}", kind);
        return JNI_FALSE;
    };
    let listener = LISTENER_REGISTRY.lock().get(&listener_id).cloned();
    match listener {
        Some(listener) if listener.on_vendor_event(event) => JNI_TRUE,
        Some(_) => JNI_FALSE,
        None => {
            log::debug!("Listener {} gone, dropping {:?}", listener_id, event);
            JNI_FALSE
        }
    }
}
