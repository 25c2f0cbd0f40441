//! Delegation tests
//!
//! # Test Scenarios
//!
//! 1. **Static Re-key**: the delegate decrypts every leaf the owner appended
//! 2. **Ephemeral Re-key**: same, with `R = r·G` stored next to the blinded key
//! 3. **Re-delegation**: a new delegate replaces the old one
//! 4. **Outsiders**: non-delegates fail the integrity gate
//! 5. **Bulk Messages**: a delegate opens a multi-chunk sponge ciphertext
//!
//! # Expected Outcomes
//!
//! - Delegate-recovered keys pass the same commitment gate as the owner's
//! - Re-keying never changes the log (`tree_root`, `next_index`)

use crate::test_utils::{init_tracing, test_config, TestHost};
use rand::rngs::OsRng;
use recryptlog_crypto::{
    decrypt_leaf, generate_rekey, generate_rekey_ephemeral, recover_key, Capability,
    FieldElement, Identity, KeyHolder, PreError, SpongeCipher,
};

fn fe(value: u64) -> FieldElement {
    FieldElement::from(value)
}

fn populated_host(values: &[u64]) -> (Identity, Capability, TestHost) {
    let owner = Identity::generate(&mut OsRng);
    let capability = Capability::new(fe(1), &owner);
    let mut host = TestHost::new(&test_config(1), &owner);
    for value in values {
        let witness = host.next_witness();
        host.submit_append(fe(*value), &witness, &capability).unwrap();
    }
    (owner, capability, host)
}

fn as_delegate<'a>(identity: &'a Identity, owner: &Identity) -> KeyHolder<'a> {
    KeyHolder::Delegate {
        identity,
        owner_public: owner.public(),
    }
}

#[test]
fn test_static_delegate_decrypts_log() {
    init_tracing();
    let (owner, capability, mut host) = populated_host(&[11, 22, 33]);
    let delegate = Identity::generate(&mut OsRng);
    let (root, next_index) = (host.state.tree_root, host.state.next_index);

    let rekeyed = generate_rekey(&host.state, &capability, &delegate.public());
    host.submit(rekeyed).unwrap();
    assert_eq!(host.state.tree_root, root);
    assert_eq!(host.state.next_index, next_index);
    assert!(host.state.re_encrypted_key.unwrap().ephemeral.is_none());

    for (leaf, expected) in host.leaves.iter().zip([11u64, 22, 33]) {
        let plaintext = decrypt_leaf(&host.state, *leaf, as_delegate(&delegate, &owner)).unwrap();
        assert_eq!(plaintext, fe(expected));
    }
}

#[test]
fn test_ephemeral_delegate_decrypts_log() {
    init_tracing();
    let (owner, capability, mut host) = populated_host(&[7, 8]);
    let delegate = Identity::generate(&mut OsRng);

    let rekeyed = generate_rekey_ephemeral(&host.state, &capability, &delegate.public(), &mut OsRng);
    host.submit(rekeyed).unwrap();
    assert!(host.state.re_encrypted_key.unwrap().ephemeral.is_some());

    // Delegation survives persistence.
    let json = host.state.to_json().unwrap();
    host.state = recryptlog_crypto::ProtocolState::from_json(&json).unwrap();

    for (leaf, expected) in host.leaves.iter().zip([7u64, 8]) {
        let plaintext = decrypt_leaf(&host.state, *leaf, as_delegate(&delegate, &owner)).unwrap();
        assert_eq!(plaintext, fe(expected));
    }
}

#[test]
fn test_redelegation_replaces_previous_delegate() {
    init_tracing();
    let (owner, capability, mut host) = populated_host(&[5]);
    let first = Identity::generate(&mut OsRng);
    let second = Identity::generate(&mut OsRng);

    host.submit(generate_rekey(&host.state, &capability, &first.public()))
        .unwrap();
    host.submit(generate_rekey(&host.state, &capability, &second.public()))
        .unwrap();

    let leaf = host.leaves[0];
    assert_eq!(
        decrypt_leaf(&host.state, leaf, as_delegate(&second, &owner)).unwrap(),
        fe(5)
    );
    assert_eq!(
        decrypt_leaf(&host.state, leaf, as_delegate(&first, &owner)),
        Err(PreError::KeyIntegrity)
    );
}

#[test]
fn test_outsider_fails_integrity_gate() {
    init_tracing();
    let (owner, capability, mut host) = populated_host(&[1]);
    let delegate = Identity::generate(&mut OsRng);
    let outsider = Identity::generate(&mut OsRng);

    assert_eq!(
        recover_key(&host.state, as_delegate(&delegate, &owner)),
        Err(PreError::NoDelegation)
    );

    host.submit(generate_rekey(&host.state, &capability, &delegate.public()))
        .unwrap();
    assert_eq!(
        recover_key(&host.state, as_delegate(&outsider, &owner)),
        Err(PreError::KeyIntegrity)
    );
}

#[test]
fn test_outsider_cannot_rekey() {
    init_tracing();
    let (_, _, mut host) = populated_host(&[1]);
    let outsider = Capability::new(fe(1), &Identity::generate(&mut OsRng));
    let before = host.state.clone();

    let result = host.submit(generate_rekey(
        &host.state,
        &outsider,
        &Identity::generate(&mut OsRng).public(),
    ));
    assert_eq!(result, Err(PreError::KeyIntegrity));
    assert_eq!(host.state, before);
}

#[test]
fn test_delegate_opens_bulk_ciphertext() {
    init_tracing();
    let (owner, capability, mut host) = populated_host(&[]);
    let delegate = Identity::generate(&mut OsRng);
    host.submit(generate_rekey_ephemeral(
        &host.state,
        &capability,
        &delegate.public(),
        &mut OsRng,
    ))
    .unwrap();

    let message: Vec<FieldElement> = (1..=9u64).map(fe).collect();
    let owner_key = recover_key(&host.state, KeyHolder::Owner(&capability)).unwrap();
    let ciphertext = SpongeCipher::new(&owner_key)
        .encrypt_with_nonce(fe(99), &message)
        .unwrap();

    let delegate_key = recover_key(&host.state, as_delegate(&delegate, &owner)).unwrap();
    let cipher = SpongeCipher::new(&delegate_key);
    assert_eq!(cipher.decrypt_with_nonce(fe(99), &ciphertext).unwrap(), message);
    assert_eq!(
        cipher.decrypt_with_nonce(fe(100), &ciphertext),
        Err(PreError::Authentication)
    );
}
