use std::io::Write;

use nmrsim_types::{NmrError, NmrResult};

/// Пишет Pascal-строку (первый байт — длина) в поле фиксированной ширины.
///
/// Остаток поля заполняется нулями.
pub fn write_pascal_str<W: Write>(
    w: &mut W,
    s: &str,
    field_len: usize,
) -> NmrResult<()> {
    let bytes = s.as_bytes();
    let max = (field_len - 1).min(u8::MAX as usize);

    if bytes.len() > max {
        return Err(NmrError::FormatViolation(format!(
            "string '{s}' is {} bytes, field holds {max}",
            bytes.len()
        )));
    }

    let mut field = vec![0u8; field_len];
    field[0] = bytes.len() as u8;
    field[1..1 + bytes.len()].copy_from_slice(bytes);
    w.write_all(&field)?;

    Ok(())
}

/// Пишет C-строку (завершается нулём) в поле фиксированной ширины.
pub fn write_c_str<W: Write>(
    w: &mut W,
    s: &str,
    field_len: usize,
) -> NmrResult<()> {
    let bytes = s.as_bytes();

    if bytes.len() >= field_len {
        return Err(NmrError::FormatViolation(format!(
            "string '{s}' is {} bytes, field holds {}",
            bytes.len(),
            field_len - 1
        )));
    }

    let mut field = vec![0u8; field_len];
    field[..bytes.len()].copy_from_slice(bytes);
    w.write_all(&field)?;

    Ok(())
}

/// Пишет `bytes` целиком, считая реально принятые байты.
///
/// В отличие от `write_all` не превращает `Ok(0)` в ошибку, а возвращает
/// число записанных байт, чтобы вызывающий мог сообщить о короткой записи.
pub fn write_counted<W: Write>(
    w: &mut W,
    bytes: &[u8],
) -> std::io::Result<usize> {
    let mut written = 0;

    while written < bytes.len() {
        match w.write(&bytes[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_str_layout() {
        let mut buf = Vec::new();
        write_pascal_str(&mut buf, "Sim data", 30).unwrap();

        assert_eq!(buf.len(), 30);
        assert_eq!(buf[0], 8);
        assert_eq!(&buf[1..9], b"Sim data");
        assert!(buf[9..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pascal_str_too_long() {
        let mut buf = Vec::new();
        let long = "x".repeat(30);
        assert!(write_pascal_str(&mut buf, &long, 30).is_err());
    }

    #[test]
    fn test_c_str_leaves_terminator() {
        let mut buf = Vec::new();
        write_c_str(&mut buf, "abc", 5).unwrap();
        assert_eq!(buf, vec![b'a', b'b', b'c', 0, 0]);

        let mut buf = Vec::new();
        assert!(write_c_str(&mut buf, "abcde", 5).is_err());
    }
}
