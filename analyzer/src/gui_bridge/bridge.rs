use crate::generator::profile::{build_track_samples_from_config, GeneratorConfig};
use crate::gui_bridge::model::AbnormalityModel;
use crate::workflow::runner::Runner;
use anyhow::Result;
use approachcore::records::TrackSample;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Bridge that hosts the HTTP endpoint serving the labeled table and
/// accepts incoming raw-track payloads.
pub struct GuiBridge {
    state: Arc<RwLock<AbnormalityModel>>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(AbnormalityModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("features")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<AbnormalityModel>>| {
                warp::reply::json(&*state.read().unwrap())
            });

        let post_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |samples: Vec<TrackSample>,
                 state: Arc<RwLock<AbnormalityModel>>,
                 runner: Arc<Runner>| async move {
                    match runner.execute(samples) {
                        Ok(result) => {
                            let mut guard = state.write().unwrap();
                            *guard = AbnormalityModel::from(&result);
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "flights": result.flights.len()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("ingest error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let generator_route = warp::path("ingest-config")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |config: GeneratorConfig,
                 state: Arc<RwLock<AbnormalityModel>>,
                 runner: Arc<Runner>| async move {
                    match build_track_samples_from_config(&config, &runner.pipeline_config())
                        .and_then(|samples| runner.execute(samples))
                    {
                        Ok(result) => {
                            let mut guard = state.write().unwrap();
                            *guard = AbnormalityModel::from(&result);
                            println!(
                                "[GUI] synthetic run -> flights {}, elevation abnormal {}",
                                result.flights.len(),
                                result.elevation_abnormal
                            );
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "flights": result.flights.len(),
                                    "elevation_abnormal": result.elevation_abnormal,
                                    "vertical_speed_abnormal": result.vertical_speed_abnormal
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("ingest-config error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(post_route).or(generator_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(gui_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &AbnormalityModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[GUI] flights: {}, elevation abnormal: {}, vertical speed abnormal: {}",
            guard.flights.len(),
            guard.elevation_abnormal,
            guard.vertical_speed_abnormal
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> AbnormalityModel {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::build_track_samples;
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::runner::Runner;
    use std::sync::Arc;

    #[test]
    fn gui_bridge_updates_state() {
        let runner = Arc::new(Runner::new(WorkflowConfig::default()));
        let gui = GuiBridge::new(runner.clone());
        let samples = build_track_samples(2, 6, &runner.pipeline_config()).unwrap();
        let result = runner.execute(samples).unwrap();
        let model = AbnormalityModel::from(&result);
        gui.publish(&model).unwrap();
        assert_eq!(gui.snapshot().flights.len(), result.flights.len());
    }
}
