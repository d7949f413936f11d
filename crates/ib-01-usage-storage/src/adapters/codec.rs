use crate::domain::errors::SerializationError;
use crate::ports::outbound::EntityCodec;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default codec using bincode.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeCodec;

impl EntityCodec for BincodeCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(value).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, SerializationError> {
        bincode::deserialize(data).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}
