//! Serialization of fitted model parameters.
//!
//! Parameter representations contain only plain numbers (no backend tensors), so the
//! encoded bytes are independent of the backend a model was trained on.

/// Parameter representations that can be encoded to and decoded from bytes.
pub trait SerializableParams: Sized {
    fn to_bytes(&self) -> bincode::Result<Vec<u8>>;

    fn from_bytes(bytes: &[u8]) -> bincode::Result<Self>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}
