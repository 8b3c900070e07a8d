use std::convert::Infallible;
use surfsup_climate::ClimateClient;
use warp::{Filter, Rejection, Reply};

use crate::error::handle_rejection;
use crate::handlers;

fn with_client(
    client: ClimateClient,
) -> impl Filter<Extract = (ClimateClient,), Error = Infallible> + Clone {
    warp::any().map(move || client.clone())
}

/// `/api/v1.0` prefix.
fn api_v1() -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::path("api").and(warp::path("v1.0"))
}

/// All routes without error recovery or request logging.
pub fn api(client: ClimateClient) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(with_client(client.clone()))
        .and_then(handlers::index);

    let precipitation = api_v1()
        .and(warp::path("precipitation"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_client(client.clone()))
        .and_then(handlers::precipitation);

    let stations = api_v1()
        .and(warp::path("stations"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_client(client.clone()))
        .and_then(handlers::stations);

    let tobs = api_v1()
        .and(warp::path("tobs"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_client(client.clone()))
        .and_then(handlers::tobs);

    // Literal routes above take precedence over the date parameter below.
    let temperature_from = api_v1()
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_client(client.clone()))
        .and_then(handlers::temperature_from);

    let temperature_range = api_v1()
        .and(warp::path::param::<String>())
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_client(client))
        .and_then(handlers::temperature_range);

    index
        .or(precipitation)
        .or(stations)
        .or(tobs)
        .or(temperature_from)
        .or(temperature_range)
}

/// Full service: routes, JSON error recovery and per-request logging.
pub fn routes(
    client: ClimateClient,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let log = warp::log::custom(|info: warp::log::Info<'_>| {
        tracing::info!(
            "{} {} {} ({:?})",
            info.method(),
            info.path(),
            info.status().as_u16(),
            info.elapsed()
        );
    });

    api(client).recover(handle_rejection).with(log)
}
