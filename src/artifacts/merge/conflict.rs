use crate::artifacts::objects::blob::Blob;
use bytes::{BufMut, Bytes, BytesMut};

/// Text written to a conflicted file; a missing side contributes nothing
pub fn conflict_text(current: Option<&Blob>, other: Option<&Blob>) -> Bytes {
    let current = current.map(Blob::content).unwrap_or_default();
    let other = other.map(Blob::content).unwrap_or_default();

    let mut text = BytesMut::with_capacity(current.len() + other.len() + 32);
    text.put_slice(b"<<<<<<< HEAD\n");
    text.put_slice(current);
    text.put_slice(b"\n=======\n");
    text.put_slice(other);
    text.put_slice(b"\n>>>>>>>\n");

    text.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn both_sides_are_wrapped_in_markers() {
        let current = Blob::new("f".to_string(), "b".to_string());
        let other = Blob::new("f".to_string(), "c".to_string());

        assert_eq!(
            conflict_text(Some(&current), Some(&other)),
            "<<<<<<< HEAD\nb\n=======\nc\n>>>>>>>\n"
        );
    }

    #[test]
    fn deleted_side_is_empty() {
        let current = Blob::new("f".to_string(), "b".to_string());

        assert_eq!(
            conflict_text(Some(&current), None),
            "<<<<<<< HEAD\nb\n=======\n\n>>>>>>>\n"
        );
    }
}
