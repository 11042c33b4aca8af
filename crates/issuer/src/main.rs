//! Issuer 演示入口
//!
//! 签发方负责：
//! - 为每张护照生成随机数和承诺
//! - 把承诺追加到 Merkle 累加器
//! - 保存凭证（承诺、随机数、属性、叶子索引、证明、根快照）
//!
//! # 使用方法
//! ```bash
//! # 默认签发 4 张演示凭证
//! cargo run --bin issuer
//!
//! # 指定数量、上下文年份和凭证文件
//! cargo run --bin issuer -- --count 10 --context 2025 --store credentials.json
//! ```

use common::{Passport, ServiceConfig};
use issuer::CredentialIssuer;
use std::path::PathBuf;
use zk_ads::to_hex;

const DEMO_BIRTH_YEARS: [i64; 6] = [1990, 2010, 1975, 2003, 1962, 2008];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();

    let mut count = 4usize;
    let mut config = ServiceConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-n" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(4);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--context" | "-c" => {
                if i + 1 < args.len() {
                    config.context = args[i + 1].parse().unwrap_or(config.context);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--store" | "-s" => {
                if i + 1 < args.len() {
                    config.credential_store = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                i += 1;
            }
        }
    }

    let issuer = match &config.credential_store {
        Some(path) if path.exists() => CredentialIssuer::restore(path, config.clone())?,
        _ => CredentialIssuer::new(config.clone()),
    };

    println!("🚀 Issuer starting...");
    println!("   Context: {}", config.context);
    println!("   Credentials to issue: {}", count);

    // 并发签发：所有写入都经过同一把锁
    let mut handles = Vec::with_capacity(count);
    for n in 0..count {
        let issuer = issuer.clone();
        let passport = Passport {
            name: format!("Holder {}", n),
            birth_year: DEMO_BIRTH_YEARS[n % DEMO_BIRTH_YEARS.len()],
            country: "NL".to_string(),
            passport_number: format!("P{:08}", n),
            expiry_year: config.context + 10,
        };
        handles.push(tokio::task::spawn_blocking(move || {
            issuer.issue_credential(&passport)
        }));
    }

    for handle in handles {
        let credential = handle.await??;
        let member = issuer.verify_membership(&credential.commitment)?;
        println!(
            "✓ leaf {:>3}  commitment {}...  proof steps {}  member {}",
            credential.leaf_index,
            &credential.commitment.to_hex()[..16],
            credential.proof.len(),
            member
        );
    }

    let stats = issuer.stats()?;
    println!("Merkle root: {}", to_hex(&stats.merkle_root));
    println!(
        "Total credentials: {} (tree height {})",
        stats.total_credentials, stats.tree_height
    );

    if let Some(path) = &config.credential_store {
        let saved = issuer.save_credentials(path)?;
        println!("Saved {} credential(s) to {}", saved, path.display());
    }

    Ok(())
}

fn print_help() {
    println!("Issuer - zk-creds demo");
    println!();
    println!("USAGE:");
    println!("    issuer [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --count <N>                Number of demo credentials to issue (default: 4)");
    println!("    -c, --context <YEAR>           Context year mixed into commitments (default: 2024)");
    println!("    -s, --store <PATH>             JSON credential store to restore from and save to");
    println!("    -h, --help                     Print this help message");
}
