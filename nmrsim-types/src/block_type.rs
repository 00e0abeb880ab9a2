/// Логические секции файла ProNMR (индекс в `offsets[8]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BlockType {
    /// Параметры сбора данных
    Acqu = 0,
    /// Параметры обработки
    Proc = 1,
    /// Параметры 2D
    TwoD = 2,
    Unused1 = 3,
    Unused2 = 4,
    Unused3 = 5,
    Unused4 = 6,
    /// Блок данных
    Dat = 7,
}

impl BlockType {
    pub fn index(&self) -> usize {
        *self as usize
    }
}
