use std::{
    borrow::Cow,
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use byteorder::ByteOrder;
use log::debug;
use nmrsim_types::{BlockType, Complex32, NmrError, NmrResult, ProNmrHeader};

use crate::{
    binary::write_counted,
    format::{
        ProNmrHeaderExt, ProNmrOrder, POINTS_PER_SECTOR, PRONMR_HEADER_SIZE, SAMPLE_BYTES,
        SECTOR_BYTES,
    },
};

/// Статистика одной записи области данных.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DataWriteStats {
    /// Смещение первой точки от начала файла, байт.
    pub start_offset_bytes: u64,
    /// Записано секторов (последний может быть неполным).
    pub sectors_written: u64,
    /// Записано точек f32, включая нулевое дополнение.
    pub points_written: u64,
    /// Записано байт.
    pub bytes_written: u64,
}

/// Писатель файла ProNMR: сначала заголовок, затем данные.
///
/// Создание писателя и есть фаза заголовка, поэтому записать данные в файл
/// без заголовка через этот тип невозможно.
pub struct ProNmrWriter {
    path: PathBuf,
    header: ProNmrHeader,
}

impl ProNmrWriter {
    /// Создаёт (усекает) файл и немедленно записывает в него заголовок.
    pub fn create<P: AsRef<Path>>(
        path: P,
        header: ProNmrHeader,
    ) -> NmrResult<Self> {
        let path = path.as_ref().to_path_buf();
        write_header(&path, &header)?;

        Ok(Self { path, header })
    }

    /// Записывает FID блоком `block_number` из `block_count`.
    ///
    /// Проверяет, что заявленный в заголовке `dataset_size` совпадает с
    /// количеством точек в одном блоке.
    pub fn write_fid(
        &self,
        samples: &[f32],
        block_number: usize,
        block_count: usize,
    ) -> NmrResult<DataWriteStats> {
        let block_count_nz = block_count.max(1);
        let block_points = samples.len() / block_count_nz;

        if block_points != self.header.dataset_size as usize {
            return Err(NmrError::format_violation(format!(
                "header declares {} points, block holds {block_points}",
                self.header.dataset_size
            )));
        }

        write_data(
            &self.path,
            samples,
            self.header.block_offset(BlockType::Dat) as usize,
            block_number,
            block_count,
        )
    }

    /// Путь к файлу.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Заголовок, записанный в файл.
    pub fn header(&self) -> &ProNmrHeader {
        &self.header
    }
}

/// Фаза заголовка: создаёт файл (усекая прежнее содержимое) и пишет 256 байт.
pub fn write_header<P: AsRef<Path>>(
    path: P,
    header: &ProNmrHeader,
) -> NmrResult<()> {
    let bytes = header.serialize()?;
    let mut file = File::create(path.as_ref())?;

    let written = write_counted(&mut file, &bytes)?;
    if written != PRONMR_HEADER_SIZE {
        return Err(NmrError::ShortWrite {
            expected: PRONMR_HEADER_SIZE,
            written,
        });
    }

    file.flush()?;
    debug!("Header written: {:?}", path.as_ref());

    Ok(())
}

/// Фаза данных: дописывает точки в уже созданный файл.
///
/// Заголовок на диске не трогается: запись начинается со смещения
/// `sector_offset` секторов.
pub fn write_data<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    sector_offset: usize,
    block_number: usize,
    block_count: usize,
) -> NmrResult<DataWriteStats> {
    let mut file = OpenOptions::new().write(true).open(path.as_ref())?;
    let stats = write_data_to(&mut file, samples, sector_offset, block_number, block_count)?;
    file.flush()?;

    debug!(
        "Data written: {:?}, {} points in {} sectors",
        path.as_ref(),
        stats.points_written,
        stats.sectors_written
    );

    Ok(stats)
}

/// Пишет `samples` посекторно в произвольный `Write + Seek`.
///
/// `samples` содержит `block_count` блоков одинаковой длины подряд. Каждый
/// блок занимает `max(len, 32)` точек, блоки короче сектора дополняются
/// нулями. Первая точка попадает в позицию
/// `sector_offset · 32 + (block_number − 1) · region`, после каждого
/// куска позиция сдвигается ровно на один сектор.
pub fn write_data_to<W: Write + Seek>(
    writer: &mut W,
    samples: &[f32],
    sector_offset: usize,
    block_number: usize,
    block_count: usize,
) -> NmrResult<DataWriteStats> {
    if samples.is_empty() {
        return Err(NmrError::precondition("no samples to write"));
    }
    if block_number == 0 {
        return Err(NmrError::precondition("block_number is 1-based"));
    }
    if block_count == 0 || samples.len() % block_count != 0 {
        return Err(NmrError::Precondition(format!(
            "{} samples cannot be split into {block_count} equal blocks",
            samples.len()
        )));
    }

    let block_points = samples.len() / block_count;
    let region = block_points.max(POINTS_PER_SECTOR);
    let data = pad_blocks(samples, block_points, region);

    let start_point = sector_offset * SECTOR_BYTES / SAMPLE_BYTES + (block_number - 1) * region;
    let mut file_pos = start_point;
    let mut sector = [0u8; SECTOR_BYTES];
    let mut stats = DataWriteStats {
        start_offset_bytes: (start_point * SAMPLE_BYTES) as u64,
        ..Default::default()
    };

    for chunk in data.chunks(POINTS_PER_SECTOR) {
        let n_bytes = chunk.len() * SAMPLE_BYTES;
        ProNmrOrder::write_f32_into(chunk, &mut sector[..n_bytes]);

        writer.seek(SeekFrom::Start((file_pos * SAMPLE_BYTES) as u64))?;
        let written = write_counted(writer, &sector[..n_bytes])?;

        if written != n_bytes {
            return Err(NmrError::ShortWrite {
                expected: chunk.len(),
                written: written / SAMPLE_BYTES,
            });
        }

        file_pos += POINTS_PER_SECTOR;
        stats.sectors_written += 1;
        stats.points_written += chunk.len() as u64;
        stats.bytes_written += n_bytes as u64;
    }

    Ok(stats)
}

/// Раскладывает комплексный FID в f32: re, im, re, im, ...
pub fn flatten_complex(fid: &[Complex32]) -> Vec<f32> {
    fid.iter().flat_map(|c| [c.re, c.im]).collect()
}

/// Читает и проверяет заголовок файла ProNMR.
pub fn read_header<P: AsRef<Path>>(path: P) -> NmrResult<ProNmrHeader> {
    let mut file = File::open(path)?;
    let mut buf = [0u8; PRONMR_HEADER_SIZE];
    file.read_exact(&mut buf)?;

    ProNmrHeader::deserialize(&buf)
}

/// Читает `points` точек блока `block_number` (с единицы).
///
/// Раскладка та же, что у [`write_data`]: блок занимает `max(points, 32)`
/// точек начиная с сектора `sector_offset`.
pub fn read_data<P: AsRef<Path>>(
    path: P,
    points: usize,
    sector_offset: usize,
    block_number: usize,
) -> NmrResult<Vec<f32>> {
    if block_number == 0 {
        return Err(NmrError::precondition("block_number is 1-based"));
    }

    let region = points.max(POINTS_PER_SECTOR);
    let start_point = sector_offset * SECTOR_BYTES / SAMPLE_BYTES + (block_number - 1) * region;

    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start((start_point * SAMPLE_BYTES) as u64))?;

    let mut raw = vec![0u8; points * SAMPLE_BYTES];
    file.read_exact(&mut raw)?;

    let mut out = vec![0f32; points];
    ProNmrOrder::read_f32_into(&raw, &mut out);

    Ok(out)
}

fn pad_blocks(
    samples: &[f32],
    block_points: usize,
    region: usize,
) -> Cow<'_, [f32]> {
    if block_points == region {
        return Cow::Borrowed(samples);
    }

    let mut padded = Vec::with_capacity(region * (samples.len() / block_points));
    for block in samples.chunks(block_points) {
        padded.extend_from_slice(block);
        padded.resize(padded.len() + region - block_points, 0.0);
    }

    Cow::Owned(padded)
}
