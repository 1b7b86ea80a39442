use super::*;
use paste::paste;

macro_rules! integer_key_tests {
    ($($type:ty),*) => {
        $(
            paste! {
                #[test]
                fn [< $type _key_in_byte_range >]() {
                    assert_eq!((0 as $type).key_byte(), Ok(0));
                    assert_eq!((97 as $type).key_byte(), Ok(b'a'));
                    assert_eq!((255 as $type).key_byte(), Ok(u8::MAX));
                }
            }
        )*
    };
}

integer_key_tests!(u8, u16, u32, u64, u128, usize, i16, i32, i64, i128, isize);

macro_rules! wide_integer_key_rejected_tests {
    ($($type:ty),*) => {
        $(
            paste! {
                #[test]
                fn [< $type _key_out_of_byte_range >]() {
                    let err = (256 as $type).key_byte().unwrap_err();
                    assert!(err.is_out_of_range());
                    assert_eq!(err.rejected_len(), None);
                    assert_eq!(
                        err.to_string(),
                        "Integer key [256] is outside of the allowed byte range [0, 255]."
                    );
                }
            }
        )*
    };
}

wide_integer_key_rejected_tests!(u16, u32, u64, u128, usize, i16, i32, i64, i128, isize);

#[test]
fn negative_integer_keys_are_rejected() {
    let err = (-1i8).key_byte().unwrap_err();
    assert!(err.is_out_of_range());
    assert_eq!(
        err.to_string(),
        "Integer key [-1] is outside of the allowed byte range [0, 255]."
    );

    assert!((i64::MIN).key_byte().is_err());
    assert_eq!((i8::MAX).key_byte(), Ok(127));
}

#[test]
fn single_byte_sequences() {
    assert_eq!(b"a".key_byte(), Ok(b'a'));
    assert_eq!([0xFFu8].key_byte(), Ok(0xFF));
    assert_eq!(vec![7u8].key_byte(), Ok(7));
    assert_eq!(Box::<[u8]>::from([9u8].as_slice()).key_byte(), Ok(9));
    assert_eq!("z".key_byte(), Ok(b'z'));
    assert_eq!(String::from("~").key_byte(), Ok(b'~'));
    assert_eq!('A'.key_byte(), Ok(b'A'));
    assert_eq!(Cow::Borrowed("q").key_byte(), Ok(b'q'));
    assert_eq!(Cow::<[u8]>::Owned(vec![3]).key_byte(), Ok(3));
    assert_eq!([-1i8].key_byte(), Ok(0xFF));
    assert_eq!(Rc::<str>::from("r").key_byte(), Ok(b'r'));
    assert_eq!(Arc::<[u8]>::from(vec![4u8]).key_byte(), Ok(4));
}

#[test]
fn multi_byte_sequences_are_rejected() {
    let err = b"ab".key_byte().unwrap_err();
    assert_eq!(err.rejected_len(), Some(2));
    assert!(!err.is_out_of_range());
    assert_eq!(
        err.to_string(),
        "Key has a byte length of [2], a child key must be exactly 1 byte long."
    );

    assert_eq!("".key_byte().unwrap_err().rejected_len(), Some(0));
    assert_eq!(Vec::<u8>::new().key_byte().unwrap_err().rejected_len(), Some(0));
    // 'é' is two bytes in UTF-8
    assert_eq!('é'.key_byte().unwrap_err().rejected_len(), Some(2));
    assert_eq!("é".key_byte().unwrap_err().rejected_len(), Some(2));
    assert_eq!('😀'.key_byte().unwrap_err().rejected_len(), Some(4));
}

#[test]
fn references_forward_to_the_referent() {
    let key = String::from("k");
    let by_ref = &key;
    assert_eq!(by_ref.key_byte(), Ok(b'k'));
    assert_eq!((&&5u32).key_byte(), Ok(5));
    assert!(Box::new(300u16).key_byte().unwrap_err().is_out_of_range());
}
