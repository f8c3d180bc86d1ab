//! JSON-массив документов — так выглядит выгрузка коллекций из хостинговой БД.

use crate::{
    error::Result,
    traits::{ReadRecords, WriteRecords},
};
use serde::{de::DeserializeOwned, Serialize};
use std::io::{BufRead, Write};

pub struct Json;

impl<T: DeserializeOwned> ReadRecords<T> for Json {
    fn read<R: BufRead>(r: R) -> Result<Vec<T>> {
        Ok(serde_json::from_reader(r)?)
    }
}

impl<T: Serialize> WriteRecords<T> for Json {
    fn write<W: Write>(mut w: W, records: &[T]) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, records)?;
        w.write_all(b"\n")?;
        Ok(())
    }
}
