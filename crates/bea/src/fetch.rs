use crate::cli::Commands;
use bea_api::{ApiKey, DataFetcher, QueryParams, Record, Throttled};
use tracing::{debug, info, trace};

/// Run one CLI command against the BEA API.
pub(crate) async fn run(command: Commands) -> anyhow::Result<()> {
    // the key lives for this run only
    let key = ApiKey::from_env("BEA_API")?;
    let fetcher = DataFetcher::new();

    match command {
        Commands::Datasets => {
            trace!("fetching the dataset directory ...");
            let datasets = fetcher.get_dataset_list(&key).await?;

            for dataset in &datasets {
                println!("{}: {}", dataset.name, dataset.description);
            }
            info!("{} datasets listed", datasets.len());
        }

        Commands::Data {
            dataset,
            table,
            geo,
            year,
            line_code,
            param,
            throttle,
        } => {
            let mut params = QueryParams::new();
            params.insert("datasetname".to_string(), dataset);
            params.insert("ResultFormat".to_string(), "JSON".to_string());
            if let Some(table) = table {
                params.insert("TableName".to_string(), table);
            }
            if let Some(geo) = geo {
                params.insert("GeoFips".to_string(), geo);
            }
            if let Some(line_code) = line_code {
                params.insert("LineCode".to_string(), line_code);
            }
            for (key, value) in param {
                params.insert(key, value);
            }

            // one request per year; no year means one request as-is
            let mut queries = Vec::new();
            if year.is_empty() {
                queries.push(params);
            } else {
                for year in year {
                    let mut params = params.clone();
                    params.insert("Year".to_string(), year);
                    queries.push(params);
                }
            }

            let throttled = throttle.then(|| Throttled::new(fetcher.clone()));

            let time = std::time::Instant::now();
            let mut records: Vec<Record> = Vec::new();
            for query in &queries {
                debug!("requesting year {:?}", query.get("Year"));
                let batch = match &throttled {
                    Some(throttled) => throttled.get_data(&key, query).await?,
                    None => fetcher.get_data(&key, query).await?,
                };
                records.extend(batch);
            }

            for record in &records {
                println!("{}", serde_json::to_string(record)?);
            }
            info!(
                "{} records collected, time elapsed: {:?}",
                records.len(),
                time.elapsed()
            );
        }
    }

    Ok(())
}
