/// 系统级集成测试：签发、持久化、恢复、验证
use common::{Passport, ServiceConfig};
use zk_ads::MerkleAccumulator;
use zk_creds::{initialize, load_config, save_config};

fn passport(name: &str, birth_year: i64) -> Passport {
    Passport {
        name: name.to_string(),
        birth_year,
        country: "JP".to_string(),
        passport_number: format!("TK{}", birth_year),
        expiry_year: 2033,
    }
}

#[tokio::test]
async fn test_persist_and_restore_system() {
    let _ = env_logger::builder().is_test(true).try_init();
    println!("\n=== 测试持久化和恢复 ===");

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let config = ServiceConfig {
        credential_store: Some(dir.path().join("credentials.json")),
        ..ServiceConfig::default()
    };
    save_config(&config, &config_path).unwrap();

    let system = initialize(load_config(&config_path).unwrap()).await.unwrap();
    let creds: Vec<_> = [1970, 1988, 2009]
        .iter()
        .enumerate()
        .map(|(i, year)| system.issue(&passport(&format!("H{}", i), *year)).unwrap())
        .collect();
    assert_eq!(system.persist().unwrap(), Some(3));
    let root = system.issuer.merkle_root().unwrap();
    println!("✓ 签发并保存 3 张凭证");

    // 重新初始化：从凭证文件恢复
    let restored = initialize(load_config(&config_path).unwrap()).await.unwrap();
    assert_eq!(restored.issuer.merkle_root().unwrap(), root);
    for cred in &creds {
        assert!(restored.issuer.verify_membership(&cred.commitment).unwrap());
        assert!(restored.verifier.is_trusted(&cred.issued_root).unwrap());
    }
    assert!(restored.verify_age(&creds[0].commitment, None).unwrap().is_old_enough);
    assert!(!restored.verify_age(&creds[2].commitment, None).unwrap().is_old_enough);
    println!("✓ 恢复后验证通过");
}

#[tokio::test]
async fn test_roots_tied_to_snapshots() {
    let system = initialize(ServiceConfig::default()).await.unwrap();

    let c0 = system.issue(&passport("c0", 1990)).unwrap();
    let root_after_c0 = system.issuer.merkle_root().unwrap();
    let c1 = system.issue(&passport("c1", 1991)).unwrap();
    let c2 = system.issue(&passport("c2", 1992)).unwrap();

    assert_eq!(c0.issued_root, root_after_c0);
    assert_ne!(c0.issued_root, c1.issued_root);
    assert_ne!(c1.issued_root, c2.issued_root);

    let live = system.issuer.merkle_root().unwrap();
    assert!(MerkleAccumulator::verify_proof(&c0.commitment, &c0.proof, &c0.issued_root));
    assert!(!MerkleAccumulator::verify_proof(&c0.commitment, &c0.proof, &live));

    // 系统按签发快照验证，因此旧凭证仍然有效
    assert!(system.verify_age(&c0.commitment, Some(18)).unwrap().is_old_enough);
}

#[tokio::test]
async fn test_verify_age_with_extreme_birth_years() {
    let system = initialize(ServiceConfig::default()).await.unwrap();

    let ancient = system.issue(&passport("min", i64::MIN)).unwrap();
    let future = system.issue(&passport("max", i64::MAX)).unwrap();

    assert!(system.verify_age(&ancient.commitment, None).unwrap().is_old_enough);
    assert!(!system.verify_age(&future.commitment, None).unwrap().is_old_enough);
    println!("✓ 极端出生年份不会导致溢出");
}
