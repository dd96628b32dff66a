use crate::mem::{MemFault, Memory};

#[test]
fn store_load_round_trip() {
    let mut mem = Memory::with_program(vec![0]);
    let id = mem.map(8);

    mem.store(id, 3, 0xdead_beef).unwrap();
    assert_eq!(mem.load(id, 3), Ok(0xdead_beef));
}

#[test]
fn mapped_segment_is_zeroed() {
    let mut mem = Memory::with_program(vec![0]);
    let id = mem.map(16);

    for offset in 0..16 {
        assert_eq!(mem.load(id, offset), Ok(0));
    }
}

#[test]
fn map_of_length_zero() {
    let mut mem = Memory::with_program(vec![0]);
    let id = mem.map(0);

    assert_eq!(
        mem.load(id, 0),
        Err(MemFault::OutOfRange { id, offset: 0, len: 0 }),
    );
}

#[test]
fn fresh_identifiers_are_sequential() {
    let mut mem = Memory::with_program(vec![0]);
    assert_eq!(mem.map(1), 1);
    assert_eq!(mem.map(1), 2);
    assert_eq!(mem.map(1), 3);
}

#[test]
fn identifier_reuse_is_lifo() {
    let mut mem = Memory::with_program(vec![0]);
    let a = mem.map(4);
    let b = mem.map(4);

    mem.unmap(a).unwrap();
    mem.unmap(b).unwrap();

    assert_eq!(mem.map(4), b);
    assert_eq!(mem.map(4), a);
}

#[test]
fn reused_segment_is_zeroed() {
    let mut mem = Memory::with_program(vec![0]);
    let id = mem.map(4);
    mem.store(id, 2, 99).unwrap();

    mem.unmap(id).unwrap();
    let id = mem.map(4);

    assert_eq!(mem.load(id, 2), Ok(0));
}

#[test]
fn load_program_copies_deeply() {
    let mut mem = Memory::with_program(vec![1, 2, 3]);
    let src = mem.map(3);
    mem.store(src, 0, 10).unwrap();
    mem.store(src, 1, 20).unwrap();

    mem.load_program(src).unwrap();

    // Writes to the source don't show through in the program segment.
    mem.store(src, 0, 99).unwrap();
    assert_eq!(mem.load(0, 0), Ok(10));

    // And writes to the program segment don't show through in the source.
    mem.store(0, 1, 77).unwrap();
    assert_eq!(mem.load(src, 1), Ok(20));
}

#[test]
fn load_program_keeps_source_mapped() {
    let mut mem = Memory::with_program(vec![0]);
    let src = mem.map(2);

    mem.load_program(src).unwrap();

    assert_eq!(mem.load(src, 0), Ok(0));
    assert!(mem.unmap(src).is_ok());
}

#[test]
fn load_program_of_segment_zero_is_a_noop() {
    let mut mem = Memory::with_program(vec![5, 6]);

    mem.load_program(0).unwrap();

    assert_eq!(mem.load(0, 0), Ok(5));
    assert_eq!(mem.load(0, 1), Ok(6));
}

#[test]
fn unmap_program_segment_is_fatal() {
    let mut mem = Memory::with_program(vec![0]);
    assert_eq!(mem.unmap(0), Err(MemFault::UnmapProgram));
}

#[test]
fn double_unmap_is_fatal() {
    let mut mem = Memory::with_program(vec![0]);
    let id = mem.map(1);

    mem.unmap(id).unwrap();
    assert_eq!(mem.unmap(id), Err(MemFault::Unmapped(id)));
}

#[test]
fn unmapped_access_is_fatal() {
    let mut mem = Memory::with_program(vec![0]);

    assert_eq!(mem.load(7, 0), Err(MemFault::Unmapped(7)));
    assert_eq!(mem.store(7, 0, 1), Err(MemFault::Unmapped(7)));
    assert_eq!(mem.load_program(7), Err(MemFault::Unmapped(7)));
}

#[test]
fn out_of_range_access_is_fatal() {
    let mut mem = Memory::with_program(vec![0]);
    let id = mem.map(4);

    assert_eq!(
        mem.load(id, 4),
        Err(MemFault::OutOfRange { id, offset: 4, len: 4 }),
    );
    assert_eq!(
        mem.store(id, 100, 1),
        Err(MemFault::OutOfRange { id, offset: 100, len: 4 }),
    );
}

#[test]
fn free_releases_everything() {
    let mut mem = Memory::with_program(vec![0]);
    let id = mem.map(4);
    mem.unmap(id).unwrap();
    mem.map(4);

    mem.free();

    assert_eq!(mem.load(0, 0), Err(MemFault::Unmapped(0)));
    // The pool is gone too: the next identifier is fresh.
    assert_eq!(mem.map(1), 0);
}
