//! Integration tests for the ledger's commitment, linking and branching rules

use forkchain::blockchain::{Block, Ledger, GENESIS_PREVIOUS_HASH};
use forkchain::crypto::digest_str;
use forkchain::merkle::merkle_root;

fn txs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Ledger with `extra` appended blocks on its active branch.
fn ledger_with_blocks(extra: usize) -> Result<Ledger, Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new();
    for i in 0..extra {
        ledger.add_block(vec![format!("payment-{}", i), format!("memo-{}", i)])?;
    }
    Ok(ledger)
}

/// Change one field of `block`, leaving its stored hash alone.
fn tamper(block: &mut Block, field: &str) {
    match field {
        "index" => block.index += 1,
        "previous_hash" => block.previous_hash = digest_str("elsewhere"),
        "timestamp" => block.timestamp -= 1,
        "transaction" => block.transactions[0] = "z".to_string(),
        "merkle_root" => block.merkle_root = Some(digest_str("fake")),
        other => panic!("unknown field {}", other),
    }
}

#[test]
fn test_merkle_root_reference_values() {
    assert_eq!(merkle_root(&["a"]), Some(digest_str("a")));

    let bc = digest_str(&format!("{}{}", digest_str("b"), digest_str("c")));
    let expected = digest_str(&format!("{}{}", digest_str("a"), bc));
    assert_eq!(merkle_root(&["a", "b", "c"]), Some(expected));

    let many = txs(&["p", "q", "r", "s", "t", "u"]);
    assert_eq!(merkle_root(&many), merkle_root(&many));
}

#[test]
fn test_genesis_block() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = Ledger::new();
    let genesis = ledger.latest_block()?;

    assert_eq!(genesis.index, 0);
    assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
    assert!(genesis.transactions.is_empty());
    assert!(genesis.merkle_root.is_none());
    assert_eq!(
        genesis.hash,
        digest_str(&format!("00{}None", genesis.timestamp))
    );
    Ok(())
}

#[test]
fn test_first_block_hash_is_reproducible() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new();
    let genesis_hash = ledger.latest_block()?.hash.clone();

    let block = ledger.add_block(txs(&["tx1", "tx2"]))?.clone();
    assert_eq!(block.index, 1);
    assert_eq!(block.previous_hash, genesis_hash);

    let root = merkle_root(&["tx1", "tx2"]).ok_or("missing root")?;
    assert_eq!(block.merkle_root.as_deref(), Some(root.as_str()));
    let recomputed = digest_str(&format!("1{}{}{}", genesis_hash, block.timestamp, root));
    assert_eq!(block.hash, recomputed);
    Ok(())
}

#[test]
fn test_single_field_tampering_is_detected() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = ledger_with_blocks(1)?;
    let latest = ledger.latest_block()?.clone();
    let next = Block::new(latest.index + 1, latest.hash.clone(), latest.timestamp + 5, txs(&["x", "y"]));
    assert!(ledger.validate_block(&next));

    for field in ["index", "previous_hash", "timestamp", "transaction", "merkle_root"] {
        let mut forged = next.clone();
        tamper(&mut forged, field);
        assert!(!ledger.validate_block(&forged), "tampered {} went unnoticed", field);
    }
    Ok(())
}

#[test]
fn test_branches_are_isolated() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = ledger_with_blocks(2)?;
    let master_before = ledger.blocks().to_vec();

    ledger.switch_branch("feature");
    ledger.add_block(txs(&["feature-only"]))?;
    assert_eq!(ledger.branch("master").ok_or("no master")?, master_before.as_slice());

    ledger.switch_branch("master");
    ledger.add_block(txs(&["master-only"]))?;

    let master = ledger.branch("master").ok_or("no master")?;
    let feature = ledger.branch("feature").ok_or("no feature")?;
    assert_eq!(master.len(), 4);
    assert_eq!(feature.len(), 4);
    assert_eq!(master[..3], feature[..3]);
    assert_ne!(master.last(), feature.last());
    assert_eq!(feature[3].transactions, vec!["feature-only"]);
    Ok(())
}

#[test]
fn test_tampering_one_branch_leaves_the_other_valid() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = ledger_with_blocks(3)?;
    ledger.switch_branch("fork");
    ledger.blocks_mut()?[2].timestamp += 100;
    assert!(!ledger.is_valid_chain());

    ledger.switch_branch("master");
    assert!(ledger.is_valid_chain());
    Ok(())
}

#[test]
fn test_chain_validation_catches_interior_corruption() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = ledger_with_blocks(4)?;
    assert!(ledger.len() >= 3);
    assert!(ledger.is_valid_chain());

    ledger.blocks_mut()?[2].hash = digest_str("corrupted");
    assert!(!ledger.is_valid_chain());

    let report = ledger.verify_chain();
    let (position, _) = report.first_fault.ok_or("expected a fault")?;
    assert_eq!(position, 2);
    Ok(())
}

#[test]
fn test_append_does_not_validate() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = ledger_with_blocks(1)?;
    ledger.blocks_mut()?[1].hash = "broken".to_string();

    // The next append links to the stored (broken) hash without complaint.
    let block = ledger.add_block(txs(&["after"]))?;
    assert_eq!(block.previous_hash, "broken");
    assert!(!ledger.is_valid_chain());
    Ok(())
}

#[test]
fn test_switch_branch_takes_names_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = ledger_with_blocks(1)?;
    ledger.switch_branch("feature");
    ledger.add_block(txs(&["feature-only"]))?;
    ledger.switch_branch("master");

    ledger.switch_branch(" feature");
    assert_eq!(ledger.current_branch(), " feature");
    assert_eq!(ledger.len(), 2);

    ledger.switch_branch("");
    assert_eq!(ledger.current_branch(), "");
    assert_eq!(ledger.branch("").ok_or("empty-named branch missing")?.len(), 2);
    assert!(ledger.is_valid_chain());
    Ok(())
}
