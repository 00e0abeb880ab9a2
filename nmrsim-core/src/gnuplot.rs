use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use nmrsim_types::{Complex32, NmrResult};

/// Выборка, которую можно вывести в текстовый дамп.
pub trait PlotValue {
    /// Значение колонки дампа; для комплексных — действительная часть.
    fn plot_value(&self) -> f32;
}

impl PlotValue for f32 {
    fn plot_value(&self) -> f32 {
        *self
    }
}

impl PlotValue for Complex32 {
    fn plot_value(&self) -> f32 {
        self.re
    }
}

/// Пишет массив как матрицу для gnuplot: одна строка на выборку,
/// завершающая пустая строка.
pub fn write_gnuplot<W: Write, S: PlotValue>(
    data: &[S],
    w: &mut W,
) -> NmrResult<()> {
    for sample in data {
        writeln!(w, "{}", sample.plot_value())?;
    }
    writeln!(w)?;

    Ok(())
}

/// Пишет комплексный FID парами `(re,im)`, по одной на строку.
pub fn write_pairs<W: Write>(
    data: &[Complex32],
    w: &mut W,
) -> NmrResult<()> {
    for c in data {
        writeln!(w, "({},{})", c.re, c.im)?;
    }

    Ok(())
}

/// Записывает gnuplot-дамп в файл.
pub fn export_gnuplot<S: PlotValue, P: AsRef<Path>>(
    data: &[S],
    path: P,
) -> NmrResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_gnuplot(data, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// Записывает дамп пар `(re,im)` в файл.
pub fn export_pairs<P: AsRef<Path>>(
    data: &[Complex32],
    path: P,
) -> NmrResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_pairs(data, &mut writer)?;
    writer.flush()?;

    Ok(())
}
