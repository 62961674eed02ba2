use argon_bridge_core::{BridgeResponse, HashPool, HashResult, HashingConfig, Result};

use crate::cli::BatchArgs;
use crate::config::load_config;
use crate::helpers::read_input;
use crate::output::print_json_line;

/// Hash every non-blank line. A line that fails still gets its error
/// response, so output lines match input lines one for one.
pub fn handle_batch(args: &BatchArgs) -> anyhow::Result<()> {
    let settings = load_config()?;
    let mut pool_config = settings.pool.to_pool_config();
    if let Some(budget) = args.memory_budget {
        pool_config.memory_budget_kib = budget;
    }
    if let Some(workers) = args.workers {
        pool_config.max_workers = workers;
    }

    let input = read_input(args.file.as_deref())?;
    let parsed: Vec<Result<HashingConfig>> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(HashingConfig::from_json_str)
        .collect();

    tracing::info!(
        requests = parsed.len(),
        memory_budget_kib = pool_config.memory_budget_kib,
        max_workers = pool_config.max_workers,
        "starting batch"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to start async runtime: {}", e))?;
    let results = runtime.block_on(run_batch(HashPool::new(pool_config), parsed));

    for result in results {
        print_json_line(&BridgeResponse::from(result).to_value())?;
    }
    Ok(())
}

/// Send the parsed lines through the pool, keeping unparsable lines in place.
async fn run_batch(pool: HashPool, parsed: Vec<Result<HashingConfig>>) -> Vec<Result<HashResult>> {
    let mut slots: Vec<Option<Result<HashResult>>> = Vec::with_capacity(parsed.len());
    let mut configs = Vec::new();
    for entry in parsed {
        match entry {
            Ok(config) => {
                configs.push(config);
                slots.push(None);
            }
            Err(e) => slots.push(Some(Err(e))),
        }
    }

    let mut hashed = pool.hash_many(configs).await.into_iter();
    slots
        .into_iter()
        .map(|slot| match slot {
            Some(result) => result,
            None => hashed.next().unwrap_or_else(|| {
                Err(argon_bridge_core::BridgeError::EngineRejected(
                    "Hashing task did not complete".to_string(),
                ))
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon_bridge_core::{ErrorCode, PoolConfig};

    #[tokio::test]
    async fn test_unparsable_lines_keep_their_place() {
        let lines = [
            r#"{"password":"one","salt":"somesalt","memory":64,"iterations":1}"#,
            "not json",
            r#"{"password":"two","salt":"somesalt","memory":64,"iterations":1}"#,
        ];
        let parsed = lines
            .iter()
            .map(|line| HashingConfig::from_json_str(line))
            .collect();
        let results = run_batch(HashPool::new(PoolConfig::default()), parsed).await;

        assert_eq!(results.len(), 3);
        let first = HashingConfig::from_json_str(lines[0]).unwrap();
        assert_eq!(
            results[0].as_ref().unwrap(),
            &argon_bridge_core::hash(&first).unwrap()
        );
        assert_eq!(
            results[1].as_ref().unwrap_err().code(),
            ErrorCode::InvalidConfig
        );
        assert!(results[2].is_ok());
        assert_ne!(
            results[0].as_ref().unwrap().raw_hash,
            results[2].as_ref().unwrap().raw_hash
        );
    }
}
