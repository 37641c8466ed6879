//! End-to-end scenarios threading entropy derivation, ranged views, the
//! index space allocator, and the WOTS dual-chain primitive together.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use coinzdense_core::{keyapi_shape, make_secret_entropy, FullKeyspace, Shape, WotsChainPair};

fn seed32(fill: u8) -> [u8; 32] { [fill; 32] }

#[test]
fn scenario_entropy_call_matches_full_range_narrow() {
    let key = seed32(7);
    let root = make_secret_entropy::<20>(key).unwrap();
    let full = root.narrow(0, u64::MAX).unwrap();
    assert_eq!(root.call(1_234_567).unwrap(), full.call(1_234_567).unwrap());
}

#[test]
fn scenario_narrow_containment_and_rejection() {
    let root = make_secret_entropy::<20>(seed32(11)).unwrap();
    let r1 = root.narrow(4000, 8000).unwrap();
    assert_eq!(r1.call(1500).unwrap(), root.call(5500).unwrap());
    assert!(r1.call(5000).is_err());
}

#[test]
fn scenario_nested_narrow_matches_composed_offset() {
    let root = make_secret_entropy::<20>(seed32(11)).unwrap();
    let r1 = root.narrow(4000, 8000).unwrap();
    let r2 = r1.narrow(50, 150).unwrap();
    assert_eq!(r2.call(75).unwrap(), root.call(4125).unwrap());
    assert!(r2.call(110).is_err());
}

#[test]
fn scenario_full_keyspace_bounds() {
    let shape = Shape::new(6, 16, vec![6, 6, 6]).unwrap();
    let root = make_secret_entropy::<20>(seed32(21)).unwrap();
    let keyspace = FullKeyspace::new(&root, shape);

    let mainkey = keyspace.mainkey_keyspace().unwrap();
    assert!(mainkey.call(123_456).is_ok());
    assert!(mainkey.call(17_600_000).is_err());

    let l0 = keyspace.l0_keyspace().unwrap();
    assert!(l0.call(4224).is_ok());
    assert!(l0.call(5000).is_err());
}

#[test]
fn scenario_keyapi_covers_all_nine_fixed_shapes() {
    for &d in &[8u8, 12, 16] {
        for &l in &[16u8, 24, 32] {
            for &c in &[4u8, 5, 6] {
                let shape = keyapi_shape(d, l, c).unwrap();
                assert!(shape.bits() <= 64);
                assert!(shape.items() > 0);
            }
        }
    }
    assert!(keyapi_shape(10, 16, 4).is_err());
}

#[test]
fn scenario_wots_chain_pair_endpoints_and_determinism() {
    let root = make_secret_entropy::<20>(seed32(31)).unwrap();
    let up = root.call(1_234_567).unwrap();
    let down = root.call(1_234_568).unwrap();
    let salt = root.call(1_234_569).unwrap();
    let chain = WotsChainPair::new(16, up, down, salt);

    let a = chain.call(188).unwrap();
    let b = chain.call(188).unwrap();
    assert_eq!(a, b);

    // index == n is the reserved "public key" request, not an error.
    assert!(chain.call(chain.n()).is_ok());
    assert!(chain.call(chain.n() + 1).is_err());
}

#[test]
fn scenario_dropping_root_dangles_every_outstanding_view() {
    let root = make_secret_entropy::<20>(seed32(41)).unwrap();
    let view = root.narrow(0, 1000).unwrap();
    drop(root);
    assert!(view.call(0).is_err());
}

#[test]
fn scenario_two_independent_master_keys_never_collide() {
    let mut rng = ChaCha20Rng::seed_from_u64(20260728);
    let mut key_a = [0u8; 32];
    let mut key_b = [0u8; 32];
    rng.fill_bytes(&mut key_a);
    rng.fill_bytes(&mut key_b);

    let root_a = make_secret_entropy::<20>(key_a).unwrap();
    let root_b = make_secret_entropy::<20>(key_b).unwrap();
    for id in [0u64, 1, 1_234_567, u64::MAX] {
        assert_ne!(root_a.call(id).unwrap(), root_b.call(id).unwrap());
    }
}
