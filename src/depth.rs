//! Depth模块 - 实现基于MiDaS的单目深度估计
//!
//! 该模块提供了单帧深度估计的完整流程，包括：
//! - 模型选择与加载
//! - 帧预处理
//! - 模型推理
//! - 深度图后处理（归一化与伪彩色）
//! - FPS 文字叠加
//!
//! # 主要组件
//!
//! - ModelConfig：模型规格与预处理参数
//! - InferenceEngine：推理引擎封装，缓存输出层名称
//! - preprocess / postprocess：逐帧调用的纯函数
//! - draw_fps：在深度图上叠加帧率
//!
//! # 工作流程
//!
//! 1. 使用ModelConfig::select选择模型规格
//! 2. 使用load_model加载ONNX模型并包装为InferenceEngine
//! 3. 对每一帧调用preprocess得到输入张量
//! 4. 调用InferenceEngine::forward执行推理
//! 5. 调用postprocess得到伪彩色深度图
//!
//! # 示例
//!
//! ```no_run
//! use depthcam::{load_model, preprocess, postprocess, EngineOptions, Frame, InferenceEngine, ModelConfig, OrtRuntime};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ModelConfig::select(true);
//! let session = load_model(cfg.model_path(), &EngineOptions::default())?;
//! let mut engine = InferenceEngine::new(OrtRuntime::new(session)?);
//!
//! let frame = Frame::filled(640, 480, [128, 128, 128]);
//! let tensor = preprocess(&frame, &cfg)?;
//! let raw = engine.forward(&tensor)?;
//! let depth_image = postprocess(&raw, frame.dimensions())?;
//! # Ok(())
//! # }
//! ```

pub mod array;
pub mod colormap;
pub mod infer;
pub mod model;
pub mod overlay;
pub mod posts;
pub mod prevs;

// 重新导出常用类型和函数
pub use array::DepthTensor;
pub use infer::{DepthRuntime, InferenceEngine, OrtRuntime};
pub use model::{EngineOptions, ExecutionTarget, ModelConfig, ModelVariant, load_model};
pub use overlay::draw_fps;
pub use posts::postprocess;
pub use prevs::preprocess;
