//! 相机与显示设备
//!
//! 采集循环只通过 `Camera` 与 `Display` 两个 trait 访问外部设备。
//! 生产实现基于 OpenCV（需要启用 `opencv` feature）。

#[cfg(feature = "opencv")]
pub mod cv;

use image::RgbImage;

use crate::error::Result;
use crate::frame::Frame;

#[cfg(feature = "opencv")]
pub use cv::{HighGuiDisplay, OpenCvCamera};

/// 相机设备
///
/// 打开设备由具体实现的构造函数完成。
pub trait Camera {
    /// 设备是否处于打开状态
    fn is_open(&self) -> bool;

    /// 读取一帧；返回空帧表示视频流结束
    fn read_frame(&mut self) -> Result<Frame>;

    /// 释放设备。释放失败只记录日志，不返回错误。
    fn close(&mut self);
}

/// 显示设备
pub trait Display {
    /// 在指定窗口中显示 RGB 图像
    fn show(&mut self, window: &str, image: &RgbImage) -> Result<()>;

    /// 等待按键，最多 `timeout_ms` 毫秒；超时返回 None
    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<char>>;

    /// 关闭所有窗口。失败只记录日志。
    fn destroy_all_windows(&mut self);
}
