use crate::objects::heap::Heap;
use crate::objects::object::ObjRef;
use crate::value::Value;

const MAX_LOAD_FACTOR: f64 = 0.75;

/// A bucket. A genuine empty slot is `key: None, value: Nil`; a tombstone
/// left behind by a removal is `key: None, value: Bool(true)` so probe chains
/// keep walking across it.
#[derive(Clone, Copy)]
struct Entry {
    key: Option<ObjRef>,
    value: Value,
}

const EMPTY_ENTRY: Entry = Entry {
    key: None,
    value: Value::Nil,
};

/// Open-addressing hash table with linear probing, keyed by interned strings.
/// Interning guarantees that handle equality is content equality, so probing
/// compares handles only; `find_string` is the one content-level lookup and
/// exists for the intern pool itself.
///
/// `count` includes tombstones, which is why growth rebuilds the table from
/// scratch and recounts only the live entries.
pub struct Table {
    count: usize,
    entries: Vec<Entry>,
}

impl Table {
    pub fn new() -> Table {
        Table {
            count: 0,
            entries: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    fn find_entry(entries: &[Entry], heap: &Heap, key: ObjRef) -> usize {
        let capacity = entries.len();
        let mut index = heap.as_string(key).hash as usize % capacity;
        let mut tombstone = None;

        loop {
            let entry = &entries[index];
            match entry.key {
                None => {
                    if matches!(entry.value, Value::Nil) {
                        // Real empty slot: hand back the first tombstone seen,
                        // if any, so its slot gets reused.
                        return tombstone.unwrap_or(index);
                    }
                    if tombstone.is_none() {
                        tombstone = Some(index);
                    }
                }
                Some(existing) if existing == key => return index,
                Some(_) => {}
            }
            index = (index + 1) % capacity;
        }
    }

    fn adjust_capacity(&mut self, heap: &Heap, new_capacity: usize) {
        let mut entries = vec![EMPTY_ENTRY; new_capacity];

        // Reinsert live entries under the new capacity, dropping tombstones.
        self.count = 0;
        for entry in &self.entries {
            if let Some(key) = entry.key {
                let dest = Table::find_entry(&entries, heap, key);
                entries[dest] = *entry;
                self.count += 1;
            }
        }

        self.entries = entries;
    }

    /// Insert or overwrite; returns true when the key was not already
    /// present. Growth happens before the probe so the probe invariant holds
    /// during the insert itself.
    pub fn set(&mut self, heap: &Heap, key: ObjRef, value: Value) -> bool {
        if self.count as f64 >= self.entries.len() as f64 * MAX_LOAD_FACTOR {
            let new_capacity = if self.entries.len() < 8 {
                8
            } else {
                self.entries.len() * 2
            };
            self.adjust_capacity(heap, new_capacity);
        }

        let index = Table::find_entry(&self.entries, heap, key);
        let entry = &mut self.entries[index];
        let is_new = entry.key.is_none();

        // Filling a tombstone does not change `count`; it was never
        // decremented by the removal.
        if is_new && matches!(entry.value, Value::Nil) {
            self.count += 1;
        }

        entry.key = Some(key);
        entry.value = value;
        is_new
    }

    pub fn get(&self, heap: &Heap, key: ObjRef) -> Option<Value> {
        if self.count == 0 {
            return None;
        }
        let index = Table::find_entry(&self.entries, heap, key);
        let entry = &self.entries[index];
        entry.key.map(|_| entry.value)
    }

    /// Remove by tombstoning the slot; returns false without mutation when
    /// the key is absent.
    pub fn remove(&mut self, heap: &Heap, key: ObjRef) -> bool {
        if self.count == 0 {
            return false;
        }
        let index = Table::find_entry(&self.entries, heap, key);
        let entry = &mut self.entries[index];
        if entry.key.is_none() {
            return false;
        }
        entry.key = None;
        entry.value = Value::Bool(true);
        true
    }

    /// Content-level probe used by the intern pool: finds an existing string
    /// with the same length, hash, and bytes.
    pub fn find_string(&self, heap: &Heap, chars: &str, hash: u32) -> Option<ObjRef> {
        if self.count == 0 {
            return None;
        }
        let capacity = self.entries.len();
        let mut index = hash as usize % capacity;

        loop {
            let entry = &self.entries[index];
            match entry.key {
                None => {
                    // Stop only at a genuine empty slot; keep probing across
                    // tombstones.
                    if matches!(entry.value, Value::Nil) {
                        return None;
                    }
                }
                Some(key) => {
                    let string = heap.as_string(key);
                    if string.chars.len() == chars.len()
                        && string.hash == hash
                        && string.chars == chars
                    {
                        return Some(key);
                    }
                }
            }
            index = (index + 1) % capacity;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjRef, Value)> + '_ {
        self.entries
            .iter()
            .filter_map(|entry| entry.key.map(|key| (key, entry.value)))
    }

    /// Tombstone every entry whose key fails the predicate. The collector
    /// uses this to purge interned strings that are about to be swept.
    pub fn retain_keys(&mut self, mut keep: impl FnMut(ObjRef) -> bool) {
        for entry in &mut self.entries {
            if let Some(key) = entry.key {
                if !keep(key) {
                    entry.key = None;
                    entry.value = Value::Bool(true);
                }
            }
        }
    }
}

impl Default for Table {
    fn default() -> Table {
        Table::new()
    }
}
