#![no_main]

use libfuzzer_sys::arbitrary::{self, Arbitrary};
use std::collections::BTreeMap;
use trienode::{
    inspect::WellFormedChecker, AsKeyByte, ChildMap, Direction, IteratorState, KeyProjection,
    NodeError, NodeIterator,
};

#[derive(Arbitrary, Debug)]
enum Key {
    Byte(u8),
    Int(i32),
    Bytes(Box<[u8]>),
    Str(String),
}

impl Key {
    fn normalize(&self) -> Option<u8> {
        let normalized = match self {
            Key::Byte(key) => key.key_byte(),
            Key::Int(key) => key.key_byte(),
            Key::Bytes(key) => key.key_byte(),
            Key::Str(key) => key.key_byte(),
        };
        normalized.ok()
    }

    fn get<'a>(&self, node: &'a ChildMap<u32, u32>) -> Result<&'a u32, NodeError> {
        match self {
            Key::Byte(key) => node.get(key),
            Key::Int(key) => node.get(key),
            Key::Bytes(key) => node.get(key),
            Key::Str(key) => node.get(key),
        }
    }
}

#[derive(Arbitrary, Debug)]
enum Action {
    Set(Key),
    Get(Key),
    GetMut(Key),
    Delete(Key),
    Contains(Key),
    Clear,
    CheckLen,
    CheckIter,
    SetEndOfString(bool),
    SetValue,
    TakeValue,
    NewCursor(bool),
    StepCursor,
    Clone,
}

/// Replays a cursor against the model.
struct CursorModel {
    cursor: NodeIterator<KeyProjection>,
    direction: Direction,
    position: Option<usize>,
    snapshot_len: usize,
    state: IteratorState,
}

impl CursorModel {
    fn step(&mut self, node: &ChildMap<u32, u32>, oracle: &BTreeMap<u8, u32>) {
        let actual = self.cursor.next(node);
        let expected = match self.state {
            IteratorState::Exhausted => Ok(None),
            IteratorState::Invalidated => Err(()),
            IteratorState::Active if oracle.len() != self.snapshot_len => {
                self.state = IteratorState::Invalidated;
                Err(())
            },
            IteratorState::Active => {
                match self.position.and_then(|position| oracle.keys().nth(position)) {
                    Some(key) => {
                        self.position = match self.direction {
                            Direction::Forward => self.position.map(|position| position + 1),
                            Direction::Backward => {
                                self.position.and_then(|position| position.checked_sub(1))
                            },
                        };
                        Ok(Some(*key))
                    },
                    None => {
                        self.state = IteratorState::Exhausted;
                        Ok(None)
                    },
                }
            },
        };

        match (actual, expected) {
            (Ok(actual), Ok(expected)) => assert_eq!(actual, expected),
            (Err(err), Err(())) => assert!(err.is_concurrent_modification()),
            (actual, expected) => panic!("cursor mismatch: {actual:?} vs {expected:?}"),
        }
        assert_eq!(self.cursor.state(), self.state);
    }
}

libfuzzer_sys::fuzz_target!(|actions: Vec<Action>| {
    let mut node = ChildMap::<u32, u32>::new();
    let mut oracle = BTreeMap::<u8, u32>::new();
    let mut end_of_string = false;
    let mut value = None;
    let mut cursor: Option<CursorModel> = None;
    let mut next_value = 0;

    for action in actions {
        match action {
            Action::Set(key) => {
                let result = match &key {
                    Key::Byte(k) => node.set(k, next_value),
                    Key::Int(k) => node.set(k, next_value),
                    Key::Bytes(k) => node.set(k, next_value),
                    Key::Str(k) => node.set(k, next_value),
                };
                match key.normalize() {
                    Some(byte) => assert_eq!(result.unwrap(), oracle.insert(byte, next_value)),
                    None => assert!(result.unwrap_err().is_invalid_key()),
                }
                next_value += 1;
            },
            Action::Get(key) => {
                let result = key.get(&node);
                match key.normalize() {
                    Some(byte) => match oracle.get(&byte) {
                        Some(expected) => assert_eq!(result.unwrap(), expected),
                        None => assert_eq!(result, Err(NodeError::KeyNotFound { key: byte })),
                    },
                    None => assert!(result.unwrap_err().is_invalid_key()),
                }
            },
            Action::GetMut(key) => {
                if let Some(byte) = key.normalize() {
                    let entry = node.get_mut(byte).ok();
                    assert_eq!(entry, oracle.get_mut(&byte));
                    if let Some(child) = entry {
                        *child = child.saturating_sub(1);
                    }
                }
            },
            Action::Delete(key) => {
                let result = match &key {
                    Key::Byte(k) => node.delete(k),
                    Key::Int(k) => node.delete(k),
                    Key::Bytes(k) => node.delete(k),
                    Key::Str(k) => node.delete(k),
                };
                match key.normalize() {
                    Some(byte) => match oracle.remove(&byte) {
                        Some(expected) => assert_eq!(result, Ok(expected)),
                        None => assert!(result.unwrap_err().is_key_not_found()),
                    },
                    None => assert!(result.unwrap_err().is_invalid_key()),
                }
            },
            Action::Contains(key) => {
                if let Some(byte) = key.normalize() {
                    assert_eq!(node.contains(byte), Ok(oracle.contains_key(&byte)));
                }
            },
            Action::Clear => {
                node.clear();
                oracle.clear();
                assert_eq!(node.capacity(), 0);
            },
            Action::CheckLen => {
                assert_eq!(node.len(), oracle.len());
                assert_eq!(node.is_empty(), oracle.is_empty());
                assert!(node.capacity() >= node.len());
            },
            Action::CheckIter => {
                assert!(node.iter().eq(oracle.iter().map(|(k, v)| (*k, v))));
                assert!(node
                    .iter()
                    .rev()
                    .eq(oracle.iter().rev().map(|(k, v)| (*k, v))));
                assert_eq!(node.first(), oracle.first_key_value().map(|(k, v)| (*k, v)));
                assert_eq!(node.last(), oracle.last_key_value().map(|(k, v)| (*k, v)));
            },
            Action::SetEndOfString(flag) => {
                node.set_end_of_string(flag);
                end_of_string = flag;
                if !flag {
                    value = None;
                }
            },
            Action::SetValue => {
                assert_eq!(node.set_value(next_value), value.replace(next_value));
                end_of_string = true;
                next_value += 1;
            },
            Action::TakeValue => {
                assert_eq!(node.take_value(), value.take());
            },
            Action::NewCursor(forward) => {
                let direction = if forward {
                    Direction::Forward
                } else {
                    Direction::Backward
                };
                cursor = Some(CursorModel {
                    cursor: NodeIterator::new(&node, direction),
                    direction,
                    position: match direction {
                        Direction::Forward => Some(0),
                        Direction::Backward => oracle.len().checked_sub(1),
                    },
                    snapshot_len: oracle.len(),
                    state: IteratorState::Active,
                });
            },
            Action::StepCursor => {
                if let Some(cursor) = cursor.as_mut() {
                    cursor.step(&node, &oracle);
                }
            },
            Action::Clone => {
                let cloned = node.clone();
                assert_eq!(cloned, node);
                node = cloned;
            },
        }

        assert_eq!(node.is_end_of_string(), end_of_string);
        assert_eq!(node.value().ok(), value.as_ref());
        WellFormedChecker::check(&node).unwrap();
    }
});
