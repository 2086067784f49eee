use std::sync::LazyLock;

use image::Rgb;

/// jet 伪彩色查找表，低值为暗蓝，高值为暗红
pub static JET: LazyLock<Colormap> = LazyLock::new(Colormap::jet);

/// 256 项的伪彩色查找表
pub struct Colormap {
    table: [Rgb<u8>; 256],
}

impl Colormap {
    /// 生成标准 jet 色表
    ///
    /// 每个通道是一个分段线性的“帽子”函数，两端分别为暗蓝和暗红。
    pub fn jet() -> Self {
        let mut table = [Rgb([0, 0, 0]); 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let v = i as f32 / 255.0;
            let r = hat(4.0 * v - 3.0);
            let g = hat(4.0 * v - 2.0);
            let b = hat(4.0 * v - 1.0);
            *entry = Rgb([r, g, b]);
        }
        Self { table }
    }

    pub fn lookup(&self, value: u8) -> Rgb<u8> {
        self.table[value as usize]
    }
}

fn hat(offset: f32) -> u8 {
    ((1.5 - offset.abs()).clamp(0.0, 1.0) * 255.0).round() as u8
}
