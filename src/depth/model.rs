use std::path::Path;

use log::{debug, info};
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider, ExecutionProviderDispatch};
use ort::session::{builder::GraphOptimizationLevel, Session};

use crate::config::{
    ACCELERATOR_DEVICE_ID, INTRA_THREADS, LARGE_INPUT_SIZE, LARGE_MODEL_PATH, MEAN_RGB, PIXEL_SCALE, SMALL_INPUT_SIZE,
    SMALL_MODEL_PATH,
};
use crate::error::{DepthError, Result};

/// 预训练深度模型的两种固定规格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVariant {
    /// MiDaS v2.1 Small，输入 256x256
    Small,
    /// MiDaS v2.1 Large，输入 384x384
    Large,
}

impl ModelVariant {
    /// 模型文件路径
    pub fn model_path(&self) -> &'static Path {
        match self {
            ModelVariant::Small => Path::new(SMALL_MODEL_PATH),
            ModelVariant::Large => Path::new(LARGE_MODEL_PATH),
        }
    }
}

/// 模型规格及其预处理参数
///
/// 进程启动时选定后不再改变。
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub variant: ModelVariant,
    /// 网络输入尺寸 (宽, 高)
    pub input_size: (u32, u32),
    /// 像素缩放系数
    pub pixel_scale: f32,
    /// 按 RGB 顺序给出的逐通道均值
    pub mean: [f32; 3],
    /// 是否把设备的 BGR 顺序交换为 RGB
    pub swap_rb: bool,
}

impl ModelConfig {
    /// 根据“是否使用小模型”选择模型规格
    ///
    /// # 示例
    ///
    /// ```
    /// use depthcam::ModelConfig;
    ///
    /// let cfg = ModelConfig::select(true);
    /// assert_eq!(cfg.input_size, (256, 256));
    /// ```
    pub fn select(use_small: bool) -> Self {
        if use_small {
            Self::for_variant(ModelVariant::Small)
        } else {
            Self::for_variant(ModelVariant::Large)
        }
    }

    pub fn for_variant(variant: ModelVariant) -> Self {
        let side = match variant {
            ModelVariant::Small => SMALL_INPUT_SIZE,
            ModelVariant::Large => LARGE_INPUT_SIZE,
        };
        Self {
            variant,
            input_size: (side, side),
            pixel_scale: PIXEL_SCALE,
            mean: MEAN_RGB,
            swap_rb: true,
        }
    }

    pub fn input_width(&self) -> usize {
        self.input_size.0 as usize
    }

    pub fn input_height(&self) -> usize {
        self.input_size.1 as usize
    }

    pub fn model_path(&self) -> &'static Path {
        self.variant.model_path()
    }
}

/// 推理后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionTarget {
    /// CUDA 加速设备
    Cuda { device_id: i32 },
    Cpu,
}

impl ExecutionTarget {
    fn dispatch(&self) -> ExecutionProviderDispatch {
        match self {
            ExecutionTarget::Cuda { device_id } => CUDAExecutionProvider::default()
                .with_device_id(*device_id)
                .build(),
            ExecutionTarget::Cpu => CPUExecutionProvider::default().build(),
        }
    }
}

/// 推理执行偏好，只在启动时设置一次
///
/// `targets` 按优先级排列；前面的后端不可用时由运行时依次回退。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub targets: Vec<ExecutionTarget>,
    pub intra_threads: usize,
}

impl EngineOptions {
    /// 只使用 CPU 执行
    pub fn cpu_only() -> Self {
        Self {
            targets: vec![ExecutionTarget::Cpu],
            ..Self::default()
        }
    }
}

impl Default for EngineOptions {
    /// 优先使用加速设备，CPU 作为兜底
    fn default() -> Self {
        Self {
            targets: vec![
                ExecutionTarget::Cuda {
                    device_id: ACCELERATOR_DEVICE_ID,
                },
                ExecutionTarget::Cpu,
            ],
            intra_threads: INTRA_THREADS,
        }
    }
}

/// 加载 MiDaS 深度模型
///
/// 加载ONNX格式的模型，并应用固定的执行偏好：按 `options.targets` 注册后端，
/// 图优化级别 3，固定线程数。
///
/// # 参数
/// * `model_path` - 模型文件路径
/// * `options` - 执行偏好
///
/// # 错误处理
/// 文件不存在或无法解析时返回 `DepthError::ModelLoad`
///
/// # 示例
///
/// ```no_run
/// use depthcam::{load_model, EngineOptions, ModelConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cfg = ModelConfig::select(true);
/// let session = load_model(cfg.model_path(), &EngineOptions::default())?;
/// # Ok(())
/// # }
/// ```
pub fn load_model(model_path: &Path, options: &EngineOptions) -> Result<Session> {
    let load_error = |reason: String| DepthError::ModelLoad {
        path: model_path.to_path_buf(),
        reason,
    };

    if !model_path.exists() {
        return Err(load_error("模型文件不存在".to_string()));
    }

    debug!("执行后端偏好: {:?}", options.targets);
    let session = build_session(model_path, options).map_err(|e| load_error(e.to_string()))?;

    info!("模型已加载: {}", model_path.display());
    Ok(session)
}

fn build_session(model_path: &Path, options: &EngineOptions) -> ort::Result<Session> {
    let providers: Vec<ExecutionProviderDispatch> = options.targets.iter().map(ExecutionTarget::dispatch).collect();
    let session = Session::builder()?
        .with_execution_providers(providers)?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(options.intra_threads)?
        .commit_from_file(model_path)?;
    Ok(session)
}
