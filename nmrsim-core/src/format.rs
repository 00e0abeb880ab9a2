//! Спецификация формата файлов ProNMR (NMR86), версия 2
//!
//! Файл состоит из 256-байтного заголовка параметров сбора данных и области
//! данных, выровненной по секторам в 128 байт (32 точки f32). Все
//! многобайтовые числа хранятся в порядке little-endian, как в исходных
//! PC-файлах. Поля пишутся по одному, без выравнивания структуры.

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use nmrsim_types::{
    AcquisitionParams, BlockType, FidLayout, NmrError, NmrResult, ProNmrHeader,
};

use crate::binary::{read_c_str, read_pascal_str, write_c_str, write_pascal_str};

/// Порядок байт формата.
pub type ProNmrOrder = LittleEndian;

/// Ключевое слово файла: Pascal-строка "\x05NMR86", дополненная нулями
pub const PRONMR_KEY_NAME: [u8; 8] = [5, b'N', b'M', b'R', b'8', b'6', 0, 0];

/// Текущая версия формата
pub const PRONMR_VERSION: u8 = 2;

/// Размер фиксированного заголовка (256 байт)
pub const PRONMR_HEADER_SIZE: usize = 256;

/// Байт в одном секторе
pub const SECTOR_BYTES: usize = 128;

/// Байт в одной выборке (f32)
pub const SAMPLE_BYTES: usize = 4;

/// Точек f32 в одном секторе
pub const POINTS_PER_SECTOR: usize = SECTOR_BYTES / SAMPLE_BYTES;

/// Максимальный размер набора данных (SI)
pub const MAX_DATASET_SIZE: usize = 32_768;

/// Частота спектрометра по умолчанию, Гц
pub const DEFAULT_SPECTROMETER_FREQ: f64 = 100.0e6;

const KEY_NAME_LEN: usize = 8;
const FILENAME_LEN: usize = 30;
const MACHINE_ID_LEN: usize = 30;
const DATE_LEN: usize = 31;
const COMMENT_LEN: usize = 41;

/// Расширение [`ProNmrHeader`]: построение и бинарное (де)кодирование.
pub trait ProNmrHeaderExt: Sized {
    /// Заголовок с эталонными значениями генератора и пустым набором данных.
    fn new(spectrometer_freq: f64) -> Self;

    /// Заголовок для FID из `points` значений f32 в раскладке `layout`.
    fn for_fid(
        points: usize,
        params: &AcquisitionParams,
        layout: FidLayout,
    ) -> NmrResult<Self>;

    /// Сериализация заголовка в 256 байт
    fn serialize(&self) -> NmrResult<[u8; PRONMR_HEADER_SIZE]>;

    /// Десериализация заголовка из 256 байт
    fn deserialize(buf: &[u8; PRONMR_HEADER_SIZE]) -> NmrResult<Self>;

    /// Смещение секции `block` в секторах.
    fn block_offset(
        &self,
        block: BlockType,
    ) -> u8;

    /// Установлен ли бит `flag` слова состояния.
    fn has_status(
        &self,
        flag: u16,
    ) -> bool;
}

impl ProNmrHeaderExt for ProNmrHeader {
    fn new(spectrometer_freq: f64) -> Self {
        let mut offsets = [0u8; 8];
        offsets[BlockType::Acqu.index()] = 0;
        offsets[BlockType::Dat.index()] = (PRONMR_HEADER_SIZE / SECTOR_BYTES) as u8;

        ProNmrHeader {
            key_name: PRONMR_KEY_NAME,
            file_version: PRONMR_VERSION,
            offsets,
            dataset_size: 0,
            points_collected: 0,
            num_records: 1,
            status_flags: FidLayout::Complex.status_flags(),
            num_scans: 1,
            spectrometer_freq,
            obs_offset: 0.0,
            dwell_period: 0.001,
            pre_acq_delay: 0.0,
            filename: "filename".to_string(),
            machine_id: "Sim data".to_string(),
            date_text: ctime_now(),
            comment1: String::new(),
            comment2: String::new(),
            variable_delay: 0.0,
            in2d: 0.0,
            secondary_freq: 0.0,
            secondary_offset: 0.0,
        }
    }

    fn for_fid(
        points: usize,
        params: &AcquisitionParams,
        layout: FidLayout,
    ) -> NmrResult<Self> {
        if points == 0 || points > MAX_DATASET_SIZE {
            return Err(NmrError::format_violation(format!(
                "dataset size {points} outside 1..={MAX_DATASET_SIZE}"
            )));
        }

        let mut header = Self::new(DEFAULT_SPECTROMETER_FREQ);
        header.dataset_size = points as u16;
        header.points_collected = points as u16;
        header.status_flags = layout.status_flags();
        header.dwell_period = params.dwell_period;
        header.pre_acq_delay = params.pre_acq_delay as f32;

        Ok(header)
    }

    fn serialize(&self) -> NmrResult<[u8; PRONMR_HEADER_SIZE]> {
        let mut w = Vec::with_capacity(PRONMR_HEADER_SIZE);

        w.write_all(&self.key_name)?;
        w.write_u8(self.file_version)?;
        w.write_all(&self.offsets)?;

        w.write_u16::<ProNmrOrder>(self.dataset_size)?;
        w.write_u16::<ProNmrOrder>(self.points_collected)?;
        w.write_u16::<ProNmrOrder>(self.num_records)?;
        w.write_u16::<ProNmrOrder>(self.status_flags)?;
        w.write_u16::<ProNmrOrder>(self.num_scans)?;

        w.write_f64::<ProNmrOrder>(self.spectrometer_freq)?;
        w.write_f64::<ProNmrOrder>(self.obs_offset)?;
        w.write_f64::<ProNmrOrder>(self.dwell_period)?;
        w.write_f32::<ProNmrOrder>(self.pre_acq_delay)?;

        write_pascal_str(&mut w, &self.filename, FILENAME_LEN)?;
        write_pascal_str(&mut w, &self.machine_id, MACHINE_ID_LEN)?;
        write_c_str(&mut w, &self.date_text, DATE_LEN)?;
        write_c_str(&mut w, &self.comment1, COMMENT_LEN)?;
        write_c_str(&mut w, &self.comment2, COMMENT_LEN)?;

        w.write_f32::<ProNmrOrder>(self.variable_delay)?;
        w.write_f64::<ProNmrOrder>(self.in2d)?;
        w.write_f64::<ProNmrOrder>(self.secondary_freq)?;
        w.write_f64::<ProNmrOrder>(self.secondary_offset)?;

        if w.len() != PRONMR_HEADER_SIZE {
            return Err(NmrError::format_violation(format!(
                "header serialized to {} bytes, expected {PRONMR_HEADER_SIZE}",
                w.len()
            )));
        }

        let mut buf = [0u8; PRONMR_HEADER_SIZE];
        buf.copy_from_slice(&w);

        Ok(buf)
    }

    fn deserialize(buf: &[u8; PRONMR_HEADER_SIZE]) -> NmrResult<Self> {
        let mut r = Cursor::new(&buf[..]);

        let mut key_name = [0u8; KEY_NAME_LEN];
        r.read_exact(&mut key_name)?;
        if key_name[..6] != PRONMR_KEY_NAME[..6] {
            return Err(NmrError::InvalidKeyName(
                String::from_utf8_lossy(&key_name).into_owned(),
            ));
        }

        let file_version = r.read_u8()?;
        if file_version != PRONMR_VERSION {
            return Err(NmrError::UnsupportedVersion {
                found: file_version,
                expected: PRONMR_VERSION,
            });
        }

        let mut offsets = [0u8; 8];
        r.read_exact(&mut offsets)?;

        let dataset_size = r.read_u16::<ProNmrOrder>()?;
        let points_collected = r.read_u16::<ProNmrOrder>()?;
        let num_records = r.read_u16::<ProNmrOrder>()?;
        let status_flags = r.read_u16::<ProNmrOrder>()?;
        let num_scans = r.read_u16::<ProNmrOrder>()?;

        let spectrometer_freq = r.read_f64::<ProNmrOrder>()?;
        let obs_offset = r.read_f64::<ProNmrOrder>()?;
        let dwell_period = r.read_f64::<ProNmrOrder>()?;
        let pre_acq_delay = r.read_f32::<ProNmrOrder>()?;

        let filename = read_pascal_str(&mut r, FILENAME_LEN)?;
        let machine_id = read_pascal_str(&mut r, MACHINE_ID_LEN)?;
        let date_text = read_c_str(&mut r, DATE_LEN)?;
        let comment1 = read_c_str(&mut r, COMMENT_LEN)?;
        let comment2 = read_c_str(&mut r, COMMENT_LEN)?;

        let variable_delay = r.read_f32::<ProNmrOrder>()?;
        let in2d = r.read_f64::<ProNmrOrder>()?;
        let secondary_freq = r.read_f64::<ProNmrOrder>()?;
        let secondary_offset = r.read_f64::<ProNmrOrder>()?;

        Ok(ProNmrHeader {
            key_name,
            file_version,
            offsets,
            dataset_size,
            points_collected,
            num_records,
            status_flags,
            num_scans,
            spectrometer_freq,
            obs_offset,
            dwell_period,
            pre_acq_delay,
            filename,
            machine_id,
            date_text,
            comment1,
            comment2,
            variable_delay,
            in2d,
            secondary_freq,
            secondary_offset,
        })
    }

    fn block_offset(
        &self,
        block: BlockType,
    ) -> u8 {
        self.offsets[block.index()]
    }

    fn has_status(
        &self,
        flag: u16,
    ) -> bool {
        (self.status_flags & flag) != 0
    }
}

/// Текущее локальное время в стиле ctime(3), без перевода строки.
pub fn ctime_now() -> String {
    chrono::Local::now()
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}

#[cfg(test)]
mod tests {
    use nmrsim_types::{AQ_SEQ, AQ_SIM, SHUFF};

    use super::*;

    fn deterministic_header() -> ProNmrHeader {
        let params = AcquisitionParams::new(0.001, 0.0, 1024);
        let mut h = ProNmrHeader::for_fid(2048, &params, FidLayout::Complex).unwrap();
        h.date_text = "Mon Jan  1 00:00:00 2024".to_string();
        h
    }

    #[test]
    fn test_header_round_trip() {
        let mut header = deterministic_header();
        header.obs_offset = 1_250.5;
        header.comment1 = "synthetic".to_string();

        let serialized = header.serialize().unwrap();
        assert_eq!(std::mem::size_of_val(&serialized), PRONMR_HEADER_SIZE);

        let deserialized = ProNmrHeader::deserialize(&serialized).unwrap();
        assert_eq!(deserialized, header);
    }

    #[test]
    fn test_header_byte_layout() {
        let bytes = deterministic_header().serialize().unwrap();

        assert_eq!(&bytes[0..8], b"\x05NMR86\0\0", "key name");
        assert_eq!(bytes[8], 2, "version");
        assert_eq!(bytes[9], 0, "offsets[ACQU]");
        assert_eq!(bytes[9 + 7], 2, "offsets[DAT]");
        // dataset_size = 2048 = 0x0800 LE
        assert_eq!(&bytes[17..19], &[0x00, 0x08], "dataset_size LE");
        assert_eq!(&bytes[19..21], &[0x00, 0x08], "points_collected LE");
        assert_eq!(&bytes[21..23], &[1, 0], "num_records");
        assert_eq!(&bytes[23..25], &[48, 0], "status = AQ_SIM | SHUFF");
        assert_eq!(&bytes[25..27], &[1, 0], "num_scans");
        assert_eq!(&bytes[27..35], &100.0e6_f64.to_le_bytes(), "sf");
        assert_eq!(&bytes[43..51], &0.001_f64.to_le_bytes(), "dw");
        assert_eq!(bytes[55], 8, "filename length prefix");
        assert_eq!(&bytes[56..64], b"filename");
        assert_eq!(bytes[85], 8, "machine id length prefix");
        assert_eq!(&bytes[86..94], b"Sim data");
        assert_eq!(&bytes[115..139], b"Mon Jan  1 00:00:00 2024");
        assert!(bytes[146..256].iter().all(|&b| b == 0), "comments + 2D zero");
    }

    #[test]
    fn test_header_invalid_key_name() {
        let mut bytes = deterministic_header().serialize().unwrap();
        bytes[1] = b'X';

        let result = ProNmrHeader::deserialize(&bytes);
        assert!(matches!(result, Err(NmrError::InvalidKeyName(_))));
    }

    #[test]
    fn test_header_unsupported_version() {
        let mut bytes = deterministic_header().serialize().unwrap();
        bytes[8] = 7;

        match ProNmrHeader::deserialize(&bytes) {
            Err(NmrError::UnsupportedVersion { found, expected }) => {
                assert_eq!(found, 7);
                assert_eq!(expected, PRONMR_VERSION);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_for_fid_status_per_layout() {
        let params = AcquisitionParams::default();

        let sim = ProNmrHeader::for_fid(2048, &params, FidLayout::Complex).unwrap();
        assert!(sim.has_status(AQ_SIM) && sim.has_status(SHUFF));

        let seq = ProNmrHeader::for_fid(2048, &params, FidLayout::Sequential).unwrap();
        assert!(seq.has_status(AQ_SEQ) && !seq.has_status(AQ_SIM));

        let sin = ProNmrHeader::for_fid(1024, &params, FidLayout::Single).unwrap();
        assert_eq!(sin.status_flags, 0);
        assert_eq!(sin.block_offset(BlockType::Dat), 2);
    }

    #[test]
    fn test_for_fid_rejects_oversized() {
        let params = AcquisitionParams::default();
        assert!(ProNmrHeader::for_fid(0, &params, FidLayout::Complex).is_err());
        assert!(ProNmrHeader::for_fid(MAX_DATASET_SIZE + 1, &params, FidLayout::Complex).is_err());
        assert!(ProNmrHeader::for_fid(MAX_DATASET_SIZE, &params, FidLayout::Complex).is_ok());
    }

    #[test]
    fn test_ctime_fits_date_field() {
        assert!(ctime_now().len() < DATE_LEN);
    }
}
