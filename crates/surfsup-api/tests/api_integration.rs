//! Route-level tests using warp's in-process test client.
//!
//! The fixture dataset ends on 2017-08-23, so the trailing-year window is
//! 2016-08-23..=2017-08-23.

use rusqlite::{params, Connection};
use serde_json::{json, Value};
use surfsup_climate::schema::CREATE_TABLES;
use surfsup_climate::{ClimateClient, SqliteClimateStore};

const STATIONS: &[(&str, &str, f64, f64, f64)] = &[
    ("USC00519397", "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0),
    ("USC00519281", "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9),
    // No measurements: must never appear in /stations
    ("USC00511918", "HONOLULU OBSERVATORY 702.2, HI US", 21.3152, -157.9992, 0.9),
];

const MEASUREMENTS: &[(&str, &str, Option<f64>, f64)] = &[
    ("USC00519281", "2016-08-22", Some(0.5), 74.0),
    ("USC00519281", "2016-08-23", Some(1.79), 77.0),
    ("USC00519281", "2017-01-01", Some(0.0), 70.0),
    ("USC00519281", "2017-01-04", Some(0.18), 75.0),
    ("USC00519281", "2017-01-07", None, 80.0),
    ("USC00519281", "2017-08-23", Some(0.45), 76.0),
    ("USC00519397", "2010-01-01", Some(0.08), 65.0),
    ("USC00519397", "2016-08-24", Some(0.05), 79.0),
    ("USC00519397", "2017-08-22", None, 82.0),
    ("USC00519397", "2017-08-23", Some(0.0), 81.0),
];

fn client_with(measurements: &[(&str, &str, Option<f64>, f64)]) -> ClimateClient {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(CREATE_TABLES).unwrap();
    for (code, name, lat, lon, elev) in STATIONS {
        conn.execute(
            "INSERT INTO station (station, name, latitude, longitude, elevation)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![code, name, lat, lon, elev],
        )
        .unwrap();
    }
    for (code, date, prcp, tobs) in measurements {
        conn.execute(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            params![code, date, prcp, tobs],
        )
        .unwrap();
    }
    ClimateClient::sqlite(SqliteClimateStore::from_connection(conn).unwrap())
}

/// GET `path` and return status and parsed JSON body.
async fn get_json(client: ClimateClient, path: &str) -> (u16, Value) {
    let res = warp::test::request()
        .method("GET")
        .path(path)
        .reply(&surfsup_api::routes(client))
        .await;

    assert_eq!(
        res.headers()["content-type"],
        "application/json",
        "{path} should return JSON"
    );
    let body = serde_json::from_slice(res.body()).unwrap();
    (res.status().as_u16(), body)
}

fn has_two_decimals(value: f64) -> bool {
    ((value * 100.0).round() / 100.0 - value).abs() < 1e-9
}

#[tokio::test]
async fn test_index_lists_routes_and_range() {
    let res = warp::test::request()
        .path("/")
        .reply(&surfsup_api::routes(client_with(MEASUREMENTS)))
        .await;

    assert_eq!(res.status(), 200);
    assert!(res.headers()["content-type"].to_str().unwrap().starts_with("text/html"));
    let body = String::from_utf8(res.body().to_vec()).unwrap();
    assert!(body.contains("/api/v1.0/precipitation"));
    assert!(body.contains("/api/v1.0/tobs"));
    assert!(body.contains("20100101-20170823"));
}

#[tokio::test]
async fn test_precipitation_trailing_year() {
    let (status, body) = get_json(client_with(MEASUREMENTS), "/api/v1.0/precipitation").await;
    assert_eq!(status, 200);

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 8);

    let dates: Vec<&str> = records.iter().map(|r| r["date"].as_str().unwrap()).collect();
    assert!(dates.iter().all(|d| ("2016-08-23"..="2017-08-23").contains(d)));
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(dates.first(), Some(&"2016-08-23"));

    // Null readings stay null
    let jan7 = records.iter().find(|r| r["date"] == "2017-01-07").unwrap();
    assert!(jan7["prcp"].is_null());
    assert!(jan7.as_object().unwrap().contains_key("prcp"));
}

#[tokio::test]
async fn test_stations_summaries() {
    let (status, body) = get_json(client_with(MEASUREMENTS), "/api/v1.0/stations").await;
    assert_eq!(status, 200);

    let stations = body.as_array().unwrap();
    assert_eq!(stations.len(), 2);
    assert!(stations.iter().all(|s| s["station"] != "USC00511918"));

    for station in stations {
        let avg = station["Average Temperature"].as_f64().unwrap();
        assert!(has_two_decimals(avg), "{avg} not rounded");
    }

    let waihee = stations.iter().find(|s| s["station"] == "USC00519281").unwrap();
    assert_eq!(waihee["name"], "WAIHEE 837.5, HI US");
    assert_eq!(waihee["latitude"], 21.45167);
    assert_eq!(waihee["elevation"], 32.9);
    assert_eq!(waihee["Average Temperature"], 75.33);
    assert_eq!(waihee["Average Precipitation"], 0.58);

    let waikiki = stations.iter().find(|s| s["station"] == "USC00519397").unwrap();
    assert_eq!(waikiki["Average Temperature"], 76.75);
    assert_eq!(waikiki["Average Precipitation"], 0.04);
}

#[tokio::test]
async fn test_tobs_most_active_station() {
    let (status, body) = get_json(client_with(MEASUREMENTS), "/api/v1.0/tobs").await;
    assert_eq!(status, 200);

    // USC00519281 has six rows against four; 2016-08-22 falls outside the window
    assert_eq!(
        body,
        json!([
            {"date": "2016-08-23", "tobs": 77.0},
            {"date": "2017-01-01", "tobs": 70.0},
            {"date": "2017-01-04", "tobs": 75.0},
            {"date": "2017-01-07", "tobs": 80.0},
            {"date": "2017-08-23", "tobs": 76.0},
        ])
    );
}

#[tokio::test]
async fn test_temperature_range() {
    let (status, body) = get_json(client_with(MEASUREMENTS), "/api/v1.0/20170101/20170107").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([{"TMIN": 70.0, "TMAX": 80.0, "TAVG": 75.0}]));
}

#[tokio::test]
async fn test_temperature_range_half_average_rounds_to_even() {
    let measurements: Vec<(&str, &str, Option<f64>, f64)> = [
        "2017-01-01", "2017-01-02", "2017-01-03", "2017-01-04", "2017-01-05", "2017-01-06",
        "2017-01-07",
    ]
    .into_iter()
    .map(|d| ("USC00519281", d, Some(0.0), 70.0))
    .chain([("USC00519281", "2017-01-08", Some(0.0), 71.0)])
    .collect();

    let (status, body) = get_json(client_with(&measurements), "/api/v1.0/20170101/20170108").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([{"TMIN": 70.0, "TMAX": 71.0, "TAVG": 70.12}]));
}

#[tokio::test]
async fn test_temperature_from_start() {
    let (status, body) = get_json(client_with(MEASUREMENTS), "/api/v1.0/20170101").await;
    assert_eq!(status, 200);

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);

    let tmin = records[0]["TMIN"].as_f64().unwrap();
    let tavg = records[0]["TAVG"].as_f64().unwrap();
    let tmax = records[0]["TMAX"].as_f64().unwrap();
    assert!(tmin <= tavg && tavg <= tmax);
    assert_eq!(tmin, 70.0);
    assert_eq!(tmax, 82.0);
    assert_eq!(tavg, 77.33);
}

#[tokio::test]
async fn test_temperature_inverted_range_is_null_record() {
    let (status, body) = get_json(client_with(MEASUREMENTS), "/api/v1.0/20170107/20170101").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([{"TMIN": null, "TMAX": null, "TAVG": null}]));
}

#[tokio::test]
async fn test_malformed_dates() {
    for path in [
        "/api/v1.0/2017-01-01",
        "/api/v1.0/20171301",
        "/api/v1.0/yesterday",
        "/api/v1.0/20170101/2017",
        "/api/v1.0/abc/20170107",
    ] {
        let (status, body) = get_json(client_with(MEASUREMENTS), path).await;
        assert_eq!(status, 400, "{path}");
        assert_eq!(body["code"], 400);
        assert!(body["error"].as_str().unwrap().contains("YYYYMMDD"), "{path}");
    }
}

#[tokio::test]
async fn test_empty_dataset() {
    for path in ["/api/v1.0/precipitation", "/api/v1.0/tobs", "/api/v1.0/20170101"] {
        let (status, body) = get_json(client_with(&[]), path).await;
        assert_eq!(status, 404, "{path}");
        assert_eq!(body["code"], 404);
    }

    let (status, body) = get_json(client_with(&[]), "/api/v1.0/stations").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    let (status, body) = get_json(client_with(&[]), "/api/v1.0/20170101/20170107").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([{"TMIN": null, "TMAX": null, "TAVG": null}]));
}

#[tokio::test]
async fn test_empty_dataset_index_still_renders() {
    let res = warp::test::request()
        .path("/")
        .reply(&surfsup_api::routes(client_with(&[])))
        .await;
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = get_json(client_with(MEASUREMENTS), "/api/v1.0/20170101/20170107/extra").await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], 404);

    let (status, _) = get_json(client_with(MEASUREMENTS), "/api/v2.0/stations").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_wrong_method() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1.0/stations")
        .reply(&surfsup_api::routes(client_with(MEASUREMENTS)))
        .await;
    assert_eq!(res.status(), 405);
}
