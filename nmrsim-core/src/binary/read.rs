use std::io::Read;

use nmrsim_types::{NmrError, NmrResult};

/// Читает Pascal-строку из поля фиксированной ширины.
pub fn read_pascal_str<R: Read>(
    r: &mut R,
    field_len: usize,
) -> NmrResult<String> {
    let mut field = vec![0u8; field_len];
    r.read_exact(&mut field)?;

    let len = field[0] as usize;
    if len >= field_len {
        return Err(NmrError::FormatViolation(format!(
            "Pascal string length {len} exceeds field of {field_len} bytes"
        )));
    }

    Ok(String::from_utf8_lossy(&field[1..1 + len]).into_owned())
}

/// Читает C-строку: всё до первого нуля в поле фиксированной ширины.
pub fn read_c_str<R: Read>(
    r: &mut R,
    field_len: usize,
) -> NmrResult<String> {
    let mut field = vec![0u8; field_len];
    r.read_exact(&mut field)?;

    let end = field.iter().position(|&b| b == 0).unwrap_or(field_len);

    Ok(String::from_utf8_lossy(&field[..end]).into_owned())
}
