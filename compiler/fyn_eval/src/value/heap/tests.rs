use super::*;

#[test]
fn clones_share_the_allocation() {
    let h1 = Heap::new(vec![1, 2, 3]);
    let h2 = h1.clone();
    assert_eq!(*h1, *h2);
    assert!(h1.ptr_eq(&h2));
}

#[test]
fn equality_compares_payloads() {
    let h1 = Heap::new("abc".to_string());
    let h2 = Heap::new("abc".to_string());
    assert_eq!(h1, h2);
    assert!(!h1.ptr_eq(&h2));
    assert_ne!(h1, Heap::new("abd".to_string()));
}

#[test]
fn into_inner_clones_only_when_shared() {
    let unique = Heap::new(vec![1]);
    assert_eq!(unique.into_inner(), vec![1]);

    let shared = Heap::new(vec![2]);
    let keep = shared.clone();
    assert_eq!(shared.into_inner(), vec![2]);
    assert_eq!(*keep, vec![2]);
}
