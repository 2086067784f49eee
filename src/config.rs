// 模型文件路径
pub const SMALL_MODEL_PATH: &str = "./weights/model-small.onnx";
pub const LARGE_MODEL_PATH: &str = "./weights/model-f6b98070.onnx";

// MiDaS v2.1 预处理参数（两种模型相同，仅输入尺寸不同）
pub const SMALL_INPUT_SIZE: u32 = 256;
pub const LARGE_INPUT_SIZE: u32 = 384;
pub const PIXEL_SCALE: f32 = 1.0 / 255.0;
pub const MEAN_RGB: [f32; 3] = [123.675, 116.28, 103.53];

// ONNX Runtime 执行配置
pub const INTRA_THREADS: usize = 4;
pub const ACCELERATOR_DEVICE_ID: i32 = 0;

// 相机设备索引
pub const DEFAULT_CAMERA_INDEX: i32 = 0;
pub const CONTINUITY_CAMERA_INDEX: i32 = 1;

// 显示与按键
pub const WINDOW_NAME: &str = "depth";
pub const QUIT_KEY: char = 'q';
pub const POLL_TIMEOUT_MS: i32 = 1;

// FPS 文字叠加
pub const FPS_TEXT_ORIGIN: (f32, f32) = (25.0, 25.0);
pub const FPS_TEXT_SCALE: f32 = 2.0;
pub const FPS_TEXT_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];
