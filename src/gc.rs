use crate::objects::heap::Heap;
use crate::objects::object::{Obj, ObjRef};
use crate::objects::object_upvalue::ObjUpvalue;
use crate::table::Table;
use crate::value::Value;

/// Aggregated GC statistics (does not include currently-live total bytes; the
/// heap tracks that).
#[derive(Default, Debug, Clone)]
pub struct GcStats {
    pub cycles: u64,
    pub total_freed_bytes: usize,
    pub last_freed_bytes: usize,
    pub last_before_bytes: usize,
    pub last_after_bytes: usize,
    pub last_next_trigger_bytes: usize,
}

impl GcStats {
    fn record(&mut self, before: usize, freed: usize, after: usize, next_trigger: usize) {
        self.cycles += 1;
        self.total_freed_bytes += freed;
        self.last_freed_bytes = freed;
        self.last_before_bytes = before;
        self.last_after_bytes = after;
        self.last_next_trigger_bytes = next_trigger;
    }
}

// Lightweight tracing macro (only active with the gc_debug feature)
#[cfg(feature = "gc_debug")]
macro_rules! gc_trace { ($($arg:tt)*) => { eprintln!("[gc-trace] {}", format_args!($($arg)*)); } }
#[cfg(not(feature = "gc_debug"))]
macro_rules! gc_trace { ($($arg:tt)*) => {}; }
pub(crate) use gc_trace;

/// Stop-the-world mark-sweep over the heap arena. Mark state lives in the
/// collector, not on the objects: a slot-indexed mark vector plus an explicit
/// gray worklist. White = unmarked, gray = marked and queued, black = marked
/// and traced.
pub struct GarbageCollector {
    marked: Vec<bool>,
    gray: Vec<ObjRef>,
    stats: GcStats,
}

impl GarbageCollector {
    pub fn new() -> GarbageCollector {
        GarbageCollector {
            marked: Vec::new(),
            gray: Vec::new(),
            stats: GcStats::default(),
        }
    }

    /// Start a cycle: every slot begins white.
    pub fn begin(&mut self, heap: &Heap) {
        self.marked.clear();
        self.marked.resize(heap.slot_count(), false);
        self.gray.clear();
    }

    pub fn mark_object(&mut self, object: ObjRef) {
        if self.marked[object.index()] {
            return;
        }
        self.marked[object.index()] = true;
        self.gray.push(object);
        gc_trace!("mark_object enqueue gray slot={}", object.index());
    }

    pub fn mark_value(&mut self, value: Value) {
        if let Value::Obj(object) = value {
            self.mark_object(object);
        }
    }

    /// Mark a table's keys and values (used for the globals store; the intern
    /// pool is deliberately not a root).
    pub fn mark_table(&mut self, table: &Table) {
        for (key, value) in table.iter() {
            self.mark_object(key);
            self.mark_value(value);
        }
    }

    pub fn is_marked(&self, object: ObjRef) -> bool {
        self.marked[object.index()]
    }

    /// Drain the gray worklist, blackening each object and graying whatever
    /// it references.
    pub fn trace_references(&mut self, heap: &Heap) {
        while let Some(object) = self.gray.pop() {
            gc_trace!("trace gray -> black slot={}", object.index());
            self.blacken_object(heap, object);
        }
    }

    fn blacken_object(&mut self, heap: &Heap, object: ObjRef) {
        match heap.get(object) {
            Obj::String(_) | Obj::Native(_) => {}
            Obj::Function(function) => {
                for &constant in &function.chunk.constants {
                    self.mark_value(constant);
                }
            }
            Obj::Closure(closure) => {
                self.mark_object(closure.function);
                for &upvalue in &closure.upvalues {
                    self.mark_object(upvalue);
                }
            }
            Obj::Upvalue(upvalue) => match *upvalue {
                // An open cell reads through a stack slot, and the stack is a
                // root in its own right.
                ObjUpvalue::Open(_) => {}
                ObjUpvalue::Closed(value) => self.mark_value(value),
            },
        }
    }

    /// Free every slot still white. Returns the bytes released.
    pub fn sweep(&mut self, heap: &mut Heap) -> usize {
        let mut freed_bytes = 0;
        for index in 0..heap.slot_count() {
            let object = ObjRef(index as u32);
            if heap.is_occupied(object) && !self.marked[index] {
                gc_trace!("sweep free slot={}", index);
                freed_bytes += heap.free(object);
            }
        }
        gc_trace!("sweep freed_bytes={}", freed_bytes);
        freed_bytes
    }

    /// Record a completed cycle (invoked by the VM, which knows the byte
    /// counts and the rescaled trigger).
    pub fn record_cycle(&mut self, before: usize, freed: usize, after: usize, next_trigger: usize) {
        self.stats.record(before, freed, after, next_trigger);
        gc_trace!(
            "cycle summary cycles={} freed={} before={} after={} next_trigger={}",
            self.stats.cycles,
            freed,
            before,
            after,
            next_trigger
        );
    }

    pub fn stats(&self) -> &GcStats {
        &self.stats
    }
}

impl Default for GarbageCollector {
    fn default() -> GarbageCollector {
        GarbageCollector::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::object_closure::ObjClosure;
    use crate::objects::object_function::ObjFunction;
    use crate::objects::object_string::ObjString;

    fn alloc_string(heap: &mut Heap, chars: &str) -> ObjRef {
        heap.alloc(Obj::String(ObjString::new(chars.to_string())))
    }

    fn run_cycle(gc: &mut GarbageCollector, heap: &mut Heap, roots: &[Value]) -> usize {
        gc.begin(heap);
        for &root in roots {
            gc.mark_value(root);
        }
        gc.trace_references(heap);
        gc.sweep(heap)
    }

    #[test]
    fn collects_unreachable_objects() {
        let mut heap = Heap::new();
        let keep = alloc_string(&mut heap, "keep");
        alloc_string(&mut heap, "drop1");
        alloc_string(&mut heap, "drop2");
        alloc_string(&mut heap, "drop3");

        let mut gc = GarbageCollector::new();
        let freed = run_cycle(&mut gc, &mut heap, &[Value::Obj(keep)]);

        assert!(freed > 0, "expected some bytes to be freed");
        assert_eq!(heap.live_count(), 1);
        assert_eq!(heap.as_string(keep).chars, "keep");
    }

    #[test]
    fn preserves_reachable_closure_and_function() {
        let mut heap = Heap::new();
        let function = heap.alloc(Obj::Function(ObjFunction::new(0, "f1".to_string())));
        let closure = heap.alloc(Obj::Closure(ObjClosure::new(function)));
        heap.alloc(Obj::Function(ObjFunction::new(0, "f2".to_string())));

        let mut gc = GarbageCollector::new();
        run_cycle(&mut gc, &mut heap, &[Value::Obj(closure)]);

        assert_eq!(heap.live_count(), 2, "closure and its function should remain");
        assert!(gc.is_marked(function));
    }

    #[test]
    fn marks_through_function_constants() {
        let mut heap = Heap::new();
        let constant = alloc_string(&mut heap, "constant");
        let mut function = ObjFunction::new(0, "f".to_string());
        function.chunk.add_constant(Value::Obj(constant));
        let function = heap.alloc(Obj::Function(function));

        let mut gc = GarbageCollector::new();
        run_cycle(&mut gc, &mut heap, &[Value::Obj(function)]);

        assert_eq!(heap.live_count(), 2);
        assert_eq!(heap.as_string(constant).chars, "constant");
    }

    #[test]
    fn marks_through_closed_upvalue() {
        let mut heap = Heap::new();
        let captured = alloc_string(&mut heap, "captured");
        let upvalue = heap.alloc(Obj::Upvalue(ObjUpvalue::Closed(Value::Obj(captured))));

        let mut gc = GarbageCollector::new();
        run_cycle(&mut gc, &mut heap, &[Value::Obj(upvalue)]);

        assert_eq!(heap.live_count(), 2, "upvalue and captured string should remain");
    }

    #[test]
    fn open_upvalue_survives_without_tracing_the_stack() {
        let mut heap = Heap::new();
        let upvalue = heap.alloc(Obj::Upvalue(ObjUpvalue::Open(3)));

        let mut gc = GarbageCollector::new();
        run_cycle(&mut gc, &mut heap, &[Value::Obj(upvalue)]);

        assert_eq!(heap.live_count(), 1);
    }

    #[test]
    fn sweep_is_idempotent_without_new_allocations() {
        let mut heap = Heap::new();
        let keep = alloc_string(&mut heap, "keep");
        alloc_string(&mut heap, "garbage");

        let mut gc = GarbageCollector::new();
        let first = run_cycle(&mut gc, &mut heap, &[Value::Obj(keep)]);
        let second = run_cycle(&mut gc, &mut heap, &[Value::Obj(keep)]);

        assert!(first > 0);
        assert_eq!(second, 0, "second cycle must not free anything new");
        assert_eq!(heap.live_count(), 1);
    }

    #[test]
    fn stats_record_cycle() {
        let mut gc = GarbageCollector::new();
        assert_eq!(gc.stats().cycles, 0);
        gc.record_cycle(1000, 400, 600, 1200);
        assert_eq!(gc.stats().cycles, 1);
        assert_eq!(gc.stats().last_before_bytes, 1000);
        assert_eq!(gc.stats().last_freed_bytes, 400);
        assert_eq!(gc.stats().last_after_bytes, 600);
        assert_eq!(gc.stats().last_next_trigger_bytes, 1200);
        assert_eq!(gc.stats().total_freed_bytes, 400);
    }
}
