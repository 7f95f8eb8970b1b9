// Java event sink invoked from whichever thread emits

use super::vm::with_env;
use crate::codec::encode_event;
use jni::objects::{GlobalRef, JValue};
use videoplayer_core::{EventSink, VideoEvent};

pub(crate) struct JniEventSink {
    sink: GlobalRef,
}

impl JniEventSink {
    pub(crate) fn new(sink: GlobalRef) -> Self {
        Self { sink }
    }
}

impl EventSink for JniEventSink {
    fn success(&self, event: &VideoEvent) {
        let json = match encode_event(event) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to encode {:?}: {}", event, e);
                return;
            }
        };
        let result = with_env(|env| {
            let payload = env.new_string(&json)?;
            env.call_method(
                &self.sink,
                "success",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&payload)],
            )?
            .v()
        });
        if let Err(e) = result {
            log::error!("Failed to deliver event: {}", e);
        }
    }

    fn error(&self, code: &str, message: &str) {
        let result = with_env(|env| {
            let code = env.new_string(code)?;
            let message = env.new_string(message)?;
            env.call_method(
                &self.sink,
                "error",
                "(Ljava/lang/String;Ljava/lang/String;)V",
                &[JValue::Object(&code), JValue::Object(&message)],
            )?
            .v()
        });
        if let Err(e) = result {
            log::error!("Failed to deliver error event: {}", e);
        }
    }
}
