//! 深度图后处理模块
//!
//! 负责把网络输出的原始深度张量转换为可直接显示的伪彩色图像：
//! 形状重解释、双线性缩放、最值归一化、量化以及伪彩色映射。

use image::{
    ImageBuffer, Luma, RgbImage,
    imageops::{self, FilterType},
};
use ndarray::{Array2, ArrayView2, Zip};

use crate::depth::array::DepthTensor;
use crate::depth::colormap::{Colormap, JET};
use crate::error::{DepthError, Result};

/// 取最小值与值域；值域为 0 或不是有限数时返回 None
fn value_range<'a>(values: impl Iterator<Item = &'a f32>) -> Option<(f64, f64)> {
    let (min, max) = values.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    let range = f64::from(max) - f64::from(min);
    if !range.is_finite() || range <= 0.0 {
        return None;
    }
    Some((f64::from(min), range))
}

/// 把深度图线性映射到 [0, 1]
///
/// 浮点图缩放要求取值在 [0, 1] 内。值域退化时整幅图为 0。
pub fn unit_range(map: &ArrayView2<'_, f32>) -> Array2<f32> {
    match value_range(map.iter()) {
        Some((min, range)) => map.mapv(|v| ((f64::from(v) - min) / range) as f32),
        None => Array2::zeros(map.raw_dim()),
    }
}

/// 双线性缩放单通道浮点图
///
/// # 参数
/// * `map` - 取值在 [0, 1] 内的深度图，形状为(H, W)
/// * `out_width` - 目标宽度
/// * `out_height` - 目标高度
///
/// # 返回值
/// 返回形状为(out_height, out_width)的深度图
pub fn resize_map(map: &Array2<f32>, out_width: u32, out_height: u32) -> Result<Array2<f32>> {
    let (height, width) = map.dim();
    let buffer: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_raw(width as u32, height as u32, map.iter().copied().collect())
            .ok_or_else(|| DepthError::Shape(format!("深度图 {}x{} 无法构造图像缓冲", width, height)))?;

    let resized = imageops::resize(&buffer, out_width, out_height, FilterType::Triangle);
    let resized = Array2::from_shape_vec((out_height as usize, out_width as usize), resized.into_raw())?;
    Ok(resized)
}

/// 归一化到 [0, 255] 并量化为 8 位
///
/// 先按 `(v - min) / (max - min)` 归一化到 [0, 1]，再乘以 255 四舍五入。
/// 当 max == min（常数深度图）时整幅图输出为 0，不会产生 NaN。
pub fn normalize_to_u8(map: &Array2<f32>) -> Array2<u8> {
    let Some((min, range)) = value_range(map.iter()) else {
        return Array2::zeros(map.raw_dim());
    };

    Zip::from(map).par_map_collect(|&v| {
        let normalized = (f64::from(v) - min) / range;
        (normalized * 255.0).round().clamp(0.0, 255.0) as u8
    })
}

/// 对 8 位灰度图应用伪彩色映射
pub fn apply_colormap(gray: &Array2<u8>, colormap: &Colormap) -> RgbImage {
    let (height, width) = gray.dim();
    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        colormap.lookup(gray[[y as usize, x as usize]])
    })
}

/// 深度后处理：原始深度张量 → 与原始帧同尺寸的伪彩色图像
///
/// # 参数
/// * `raw` - 网络输出，逻辑形状为(1, H', W')
/// * `target` - 原始帧尺寸 (宽, 高)
///
/// # 返回值
/// 返回尺寸等于 `target` 的 RGB 图像（而不是网络输出分辨率）
///
/// # 示例
///
/// ```
/// use depthcam::{postprocess, DepthTensor};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let raw = DepthTensor::from_shape_vec(&[1, 4, 4], (0..16).map(|v| v as f32).collect())?;
/// let image = postprocess(&raw, (64, 48))?;
/// assert_eq!(image.dimensions(), (64, 48));
/// # Ok(())
/// # }
/// ```
pub fn postprocess(raw: &DepthTensor, target: (u32, u32)) -> Result<RgbImage> {
    let map = raw.as_map()?;
    let resized = resize_map(&unit_range(&map), target.0, target.1)?;
    let gray = normalize_to_u8(&resized);
    Ok(apply_colormap(&gray, &JET))
}
