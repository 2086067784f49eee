use std::fmt;
use std::path::PathBuf;

/// 深度估计流水线中的错误类型
#[derive(Debug)]
pub enum DepthError {
    /// 模型文件无法读取或解析，属于致命错误
    ModelLoad { path: PathBuf, reason: String },
    /// 推理运行时错误
    Runtime(String),
    /// 张量或图像形状不符合预期
    Shape(String),
    /// 对空帧调用了预处理
    EmptyFrame,
    /// 相机或显示设备错误
    Device(String),
}

impl fmt::Display for DepthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthError::ModelLoad { path, reason } => {
                write!(f, "无法加载模型 {}: {reason}", path.display())
            }
            DepthError::Runtime(msg) => write!(f, "推理运行时错误: {msg}"),
            DepthError::Shape(msg) => write!(f, "形状错误: {msg}"),
            DepthError::EmptyFrame => write!(f, "输入帧为空"),
            DepthError::Device(msg) => write!(f, "设备错误: {msg}"),
        }
    }
}

impl std::error::Error for DepthError {}

impl From<ort::Error> for DepthError {
    fn from(err: ort::Error) -> Self {
        DepthError::Runtime(err.to_string())
    }
}

impl From<ndarray::ShapeError> for DepthError {
    fn from(err: ndarray::ShapeError) -> Self {
        DepthError::Shape(err.to_string())
    }
}

#[cfg(feature = "opencv")]
impl From<opencv::Error> for DepthError {
    fn from(err: opencv::Error) -> Self {
        DepthError::Device(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DepthError>;
