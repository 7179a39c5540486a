//! End-to-end tests: drawing surface → coordinator → matching service → map.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{matching_config, start_mock_matcher, NO_MATCHINGS, ONE_MATCHING, TWO_MATCHINGS};
use route_snap::config::{ApplyPolicy, AppConfig, RenderConfig, RenderPolicy};
use route_snap::drawing::{DrawEvent, SketchPad};
use route_snap::geo::{Coordinate, Path, SearchRadius};
use route_snap::pipeline::PipelineOutcome;
use route_snap::render::{InMemoryMap, MapSurface, RenderOutcome, ROUTE_ID};
use route_snap::{MapboxMatcher, RouteCoordinator, RouteMatcher, RouteRenderer, RouteService, Shutdown};
use tokio::net::TcpListener;

fn tashkent_line() -> Vec<Coordinate> {
    vec![
        Coordinate::new(69.24, 41.31),
        Coordinate::new(69.25, 41.32),
        Coordinate::new(69.26, 41.33),
    ]
}

type TestCoordinator = RouteCoordinator<SketchPad, MapboxMatcher, InMemoryMap>;

fn pipeline(
    addr: std::net::SocketAddr,
    render_policy: RenderPolicy,
) -> (Arc<SketchPad>, Arc<Mutex<InMemoryMap>>, TestCoordinator) {
    let (pad, _rx) = SketchPad::new();
    let surface = Arc::new(pad);
    let map = Arc::new(Mutex::new(InMemoryMap::new()));
    let matcher = Arc::new(MapboxMatcher::new(matching_config(addr)).unwrap());
    let renderer = RouteRenderer::new(
        map.clone(),
        RenderConfig {
            policy: render_policy,
            ..RenderConfig::default()
        },
    );
    let coordinator = RouteCoordinator::new(
        surface.clone(),
        matcher,
        renderer,
        25.0,
        ApplyPolicy::LastResolved,
    );
    (surface, map, coordinator)
}

#[tokio::test]
async fn test_drawn_line_is_matched_and_rendered() {
    let (addr, recorded) = start_mock_matcher(200, ONE_MATCHING).await;
    let (surface, map, coordinator) = pipeline(addr, RenderPolicy::Toggle);

    surface.create_line(tashkent_line()).unwrap();
    let outcome = coordinator.process(DrawEvent::Created).await;
    assert_eq!(outcome, PipelineOutcome::Rendered(RenderOutcome::Shown));

    let requests = recorded.all();
    assert_eq!(requests.len(), 1);
    let line = &requests[0];
    assert!(line.starts_with("GET /matching/v5/mapbox/driving/69.24,41.31;69.25,41.32;69.26,41.33?"));
    assert!(line.contains("geometries=geojson"));
    assert!(line.contains("radiuses=25;25;25"));
    assert!(line.contains("steps=true"));
    assert!(line.contains("access_token=test-token"));

    let map = map.lock().unwrap();
    assert_eq!(map.layer_ids(), vec![ROUTE_ID]);
    let layer = map.layer(ROUTE_ID).unwrap();
    assert_eq!(layer.paint.color, "#03AA46");
    let source = map.source(ROUTE_ID).unwrap();
    assert_eq!(source.data.as_path().unwrap().len(), 3);
}

#[tokio::test]
async fn test_service_error_leaves_map_untouched() {
    let (addr, recorded) = start_mock_matcher(404, r#"{"message":"Not Found"}"#).await;
    let (surface, map, coordinator) = pipeline(addr, RenderPolicy::Toggle);

    surface.create_line(tashkent_line()).unwrap();
    let outcome = coordinator.process(DrawEvent::Created).await;

    assert_eq!(outcome, PipelineOutcome::NoMatch);
    assert_eq!(recorded.len(), 1);
    assert!(!map.lock().unwrap().has_source(ROUTE_ID));
}

#[tokio::test]
async fn test_empty_matchings_is_absent() {
    let (addr, _recorded) = start_mock_matcher(200, NO_MATCHINGS).await;
    let matcher = MapboxMatcher::new(matching_config(addr)).unwrap();

    let path = Path::new(tashkent_line());
    let radii = SearchRadius::uniform(25.0, path.len());
    assert!(matcher.match_route(path, radii).await.is_none());
}

#[tokio::test]
async fn test_first_candidate_is_returned() {
    let (addr, _recorded) = start_mock_matcher(200, TWO_MATCHINGS).await;
    let matcher = MapboxMatcher::new(matching_config(addr)).unwrap();

    let path = Path::new(tashkent_line());
    let radii = SearchRadius::uniform(25.0, path.len());
    let geometry = matcher.match_route(path, radii).await.unwrap();
    assert_eq!(
        geometry.coordinates(),
        &[Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)]
    );
}

#[tokio::test]
async fn test_malformed_body_is_absent() {
    let (addr, _recorded) = start_mock_matcher(200, "not json").await;
    let matcher = MapboxMatcher::new(matching_config(addr)).unwrap();

    let path = Path::new(tashkent_line());
    let radii = SearchRadius::uniform(25.0, path.len());
    assert!(matcher.match_route(path, radii).await.is_none());
}

#[tokio::test]
async fn test_second_success_toggles_route_off() {
    let (addr, recorded) = start_mock_matcher(200, ONE_MATCHING).await;
    let (surface, map, coordinator) = pipeline(addr, RenderPolicy::Toggle);

    let feature = surface.create_line(tashkent_line()).unwrap();
    coordinator.process(DrawEvent::Created).await;
    assert!(map.lock().unwrap().has_source(ROUTE_ID));

    surface
        .update_line(&feature.id, tashkent_line()[..2].to_vec())
        .unwrap();
    let outcome = coordinator.process(DrawEvent::Updated).await;

    assert_eq!(outcome, PipelineOutcome::Rendered(RenderOutcome::Cleared));
    assert_eq!(recorded.len(), 2);
    assert!(recorded.all()[1].contains("radiuses=25;25&"));
    assert_eq!(map.lock().unwrap().layer_count(), 0);
}

#[tokio::test]
async fn test_replace_policy_keeps_one_route() {
    let (addr, _recorded) = start_mock_matcher(200, ONE_MATCHING).await;
    let (surface, map, coordinator) = pipeline(addr, RenderPolicy::Replace);

    surface.create_line(tashkent_line()).unwrap();
    coordinator.process(DrawEvent::Created).await;
    surface.create_line(tashkent_line()).unwrap();
    let outcome = coordinator.process(DrawEvent::Created).await;

    assert_eq!(outcome, PipelineOutcome::Rendered(RenderOutcome::Replaced));
    assert_eq!(map.lock().unwrap().layer_ids(), vec![ROUTE_ID]);
}

#[tokio::test]
async fn test_http_draw_reaches_map() {
    let (addr, recorded) = start_mock_matcher(200, ONE_MATCHING).await;
    let config = AppConfig {
        matching: matching_config(addr),
        ..AppConfig::default()
    };
    let service = RouteService::build(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(service.run(listener, shutdown.clone()));

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/features", base))
        .json(&serde_json::json!({
            "coordinates": [[69.24, 41.31], [69.25, 41.32], [69.26, 41.33]]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let mut route = None;
    for _ in 0..50 {
        let response = client.get(format!("{}/route", base)).send().await.unwrap();
        if response.status() == 200 {
            route = Some(response.json::<serde_json::Value>().await.unwrap());
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    let route = route.expect("route should be rendered");
    assert_eq!(route["type"], "LineString");
    assert_eq!(recorded.len(), 1);

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}
