pub mod capture;
pub mod cli;
pub mod config;
pub mod depth;
pub mod device;
pub mod error;
pub mod frame;

// 重新导出常用类型和函数
pub use capture::{CaptureLoop, FrameMetrics, LoopReport, LoopSignal, LoopState};
pub use depth::{DepthRuntime, DepthTensor, InferenceEngine, OrtRuntime};
pub use depth::{EngineOptions, ExecutionTarget, ModelConfig, ModelVariant, load_model};
pub use depth::{draw_fps, postprocess, preprocess};
pub use device::{Camera, Display};
pub use error::DepthError;
pub use frame::Frame;
