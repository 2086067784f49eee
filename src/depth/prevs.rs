use image::{ImageBuffer, Rgb, imageops::{self, FilterType}};
use ndarray::Array4;

use crate::depth::model::ModelConfig;
use crate::error::{DepthError, Result};
use crate::frame::Frame;

/// 调整帧大小以适应模型输入
///
/// 使用双线性插值直接拉伸到目标尺寸，不保持宽高比，也不裁剪。
/// 通道顺序保持不变。
///
/// # 参数
/// * `frame` - 原始帧
/// * `width` - 目标宽度
/// * `height` - 目标高度
pub fn resize_frame(frame: &Frame, width: u32, height: u32) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>> {
    let buffer = frame.as_buffer()?;
    Ok(imageops::resize(&buffer, width, height, FilterType::Triangle))
}

/// 将已缩放的图像转换为模型输入张量
///
/// 对每个像素执行：
/// 1. 按配置交换 R/B 通道
/// 2. 减去逐通道均值
/// 3. 乘以缩放系数
/// 4. 排列为NCHW格式
///
/// # 参数
/// * `img` - 尺寸已等于模型输入的图像
/// * `cfg` - 模型配置
///
/// # 返回值
/// 返回形状为(1, 3, height, width)的四维张量
pub fn image_to_tensor(img: &ImageBuffer<Rgb<u8>, Vec<u8>>, cfg: &ModelConfig) -> Array4<f32> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let raw = img.as_raw();

    Array4::from_shape_fn((1, 3, height, width), |(_, channel, y, x)| {
        let source = if cfg.swap_rb { 2 - channel } else { channel };
        let value = raw[(y * width + x) * 3 + source] as f32;
        (value - cfg.mean[channel]) * cfg.pixel_scale
    })
}

/// 帧预处理：帧 → 网络输入张量
///
/// 输出形状恒为 (1, 3, 输入高, 输入宽)，与帧的原始尺寸无关。
///
/// # 错误处理
/// 空帧应由调用方提前拦截；若仍传入则返回 `DepthError::EmptyFrame`。
///
/// # 示例
///
/// ```
/// use depthcam::{preprocess, Frame, ModelConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cfg = ModelConfig::select(true);
/// let frame = Frame::filled(640, 480, [128, 128, 128]);
/// let tensor = preprocess(&frame, &cfg)?;
/// assert_eq!(tensor.shape(), &[1, 3, 256, 256]);
/// # Ok(())
/// # }
/// ```
pub fn preprocess(frame: &Frame, cfg: &ModelConfig) -> Result<Array4<f32>> {
    if frame.is_empty() {
        return Err(DepthError::EmptyFrame);
    }
    let (width, height) = cfg.input_size;
    let resized = resize_frame(frame, width, height)?;
    Ok(image_to_tensor(&resized, cfg))
}
