//! Pretty-printed JSON arrays, one object per entity.

use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::transfer::{Decoded, ImportFailure, TransferResult};

pub fn write_records<W, T>(mut writer: W, records: &[T]) -> TransferResult<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Decode every element of the top-level array on its own, so one bad
/// object does not discard its neighbours.
pub fn read_records<R, T>(reader: R) -> TransferResult<Decoded<T>>
where
    R: Read,
    T: DeserializeOwned,
{
    let elements: Vec<Value> = serde_json::from_reader(reader)?;

    Ok(elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value::<T>(element)
                .map_err(|err| ImportFailure::new(index + 1, err.to_string()))
        })
        .collect())
}
