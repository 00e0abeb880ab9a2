//! Биты слова состояния данных (`status_flags` в заголовке).

/// Выполнено преобразование Фурье
pub const FT_DONE: u16 = 1;
/// Применено окно
pub const WIN_DONE: u16 = 2;
/// Выполнена коррекция базовой линии
pub const BC_DONE: u16 = 4;
/// Последовательная квадратурная регистрация
pub const AQ_SEQ: u16 = 8;
/// Одновременная квадратурная регистрация.
/// Если сброшены и AQ_SEQ, и AQ_SIM — одноканальные данные.
pub const AQ_SIM: u16 = 16;
/// Данные перемешаны (re/im чередуются)
pub const SHUFF: u16 = 32;
pub const FT2_DONE: u16 = 64;
pub const FT1_DONE: u16 = 128;
/// Гиперкомплексная матрица
pub const HYPER_COMPLEX: u16 = 256;
