// JavaVM cache and exception handling shared by every JNI-backed type

use jni::objects::{JObject, JString, JThrowable};
use jni::{JNIEnv, JavaVM};
use once_cell::sync::OnceCell;
use videoplayer_core::{Result, VideoPlayerError};

static JVM: OnceCell<JavaVM> = OnceCell::new();

/// Local references created per call; the frame is popped on return.
const LOCAL_FRAME_CAPACITY: i32 = 16;

pub(crate) fn cache_vm(env: &JNIEnv) -> Result<()> {
    if JVM.get().is_none() {
        let vm = env.get_java_vm().map_err(platform)?;
        let _ = JVM.set(vm);
    }
    Ok(())
}

pub(crate) fn platform(err: jni::errors::Error) -> VideoPlayerError {
    VideoPlayerError::Platform(err.to_string())
}

/// Run `f` with an env for the current thread, attaching it if needed.
///
/// A pending Java exception is cleared and turned into an error;
/// `java.io.IOException` becomes `DataSource`.
pub(crate) fn with_env<R>(f: impl FnOnce(&mut JNIEnv) -> jni::errors::Result<R>) -> Result<R> {
    let vm = JVM
        .get()
        .ok_or_else(|| VideoPlayerError::Platform("JavaVM not initialized".to_string()))?;
    let mut env = vm.attach_current_thread().map_err(platform)?;

    match env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| f(env)) {
        Ok(value) => Ok(value),
        Err(err) => Err(take_exception(&mut env).unwrap_or_else(|| platform(err))),
    }
}

fn take_exception(env: &mut JNIEnv) -> Option<VideoPlayerError> {
    if !env.exception_check().ok()? {
        return None;
    }
    let throwable = env.exception_occurred().ok()?;
    let _ = env.exception_clear();

    let message = describe(env, &throwable).unwrap_or_else(|_| "Java exception".to_string());
    let is_io = env
        .is_instance_of(&throwable, "java/io/IOException")
        .unwrap_or(false);
    if is_io {
        Some(VideoPlayerError::DataSource(message))
    } else {
        Some(VideoPlayerError::Platform(message))
    }
}

fn describe(env: &mut JNIEnv, throwable: &JThrowable) -> jni::errors::Result<String> {
    let text = env
        .call_method(throwable, "toString", "()Ljava/lang/String;", &[])?
        .l()?;
    jstring_to_string(env, &JString::from(text))
}

pub(crate) fn jstring_to_string(env: &mut JNIEnv, jstr: &JString) -> jni::errors::Result<String> {
    let java_str = env.get_string(jstr)?;
    Ok(java_str.into())
}

pub(crate) fn is_null(obj: &JObject) -> bool {
    obj.as_raw().is_null()
}
