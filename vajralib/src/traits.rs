//! Унифицированные трэйты чтения/записи записей на основе std::io::{BufRead, Write}.

use crate::error::Result;
use std::io::{BufRead, Write};

pub trait ReadRecords<T> {
    fn read<R: BufRead>(r: R) -> Result<Vec<T>>;
}

pub trait WriteRecords<T> {
    fn write<W: Write>(w: W, records: &[T]) -> Result<()>;
}
