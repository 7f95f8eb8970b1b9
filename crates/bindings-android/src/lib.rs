// Android binding for the video player plugin
// Native side of com.yourcompany.videoplayer; the Java shim only adapts
// Flutter's registrar, channels and the KSY player listeners.

pub mod codec;
mod logging;

// JNI bindings for Android
#[cfg(target_os = "android")]
mod jni_bridge;

pub use logging::init_logging;
