use image::{ImageBuffer, Rgb};

use crate::error::{DepthError, Result};

/// 相机采集的一帧图像
///
/// 三通道 8 位，按行交错存储。通道顺序与采集设备一致（OpenCV 设备为 BGR），
/// 是否交换 R/B 通道由 `ModelConfig::swap_rb` 在预处理阶段决定。
/// 帧只在一次循环迭代内有效，不会跨迭代保留。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// 由原始像素数据创建帧
    ///
    /// # 参数
    /// * `width` - 帧宽度
    /// * `height` - 帧高度
    /// * `data` - 长度必须为 `width * height * 3` 的像素数据
    ///
    /// # 错误处理
    /// 数据长度与尺寸不符时返回 `DepthError::Shape`
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| DepthError::Shape("帧尺寸溢出".to_string()))?;
        if data.len() != expected {
            return Err(DepthError::Shape(format!(
                "帧 {}x{} 需要 {} 字节，实际 {} 字节",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// 空帧，表示视频流结束
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// 用单一颜色填充的帧，通道值按设备顺序给出
    pub fn filled(width: u32, height: u32, pixel: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 3);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self { width, height, data }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 返回 (宽, 高)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// 以借用方式把像素数据包装成三通道图像缓冲区，不复制数据
    pub(crate) fn as_buffer(&self) -> Result<ImageBuffer<Rgb<u8>, &[u8]>> {
        ImageBuffer::from_raw(self.width, self.height, self.data.as_slice())
            .ok_or_else(|| DepthError::Shape("无法构建图像缓冲区".to_string()))
    }
}
