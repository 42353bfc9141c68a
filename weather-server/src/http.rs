//! Inbound HTTP surface: `POST /weather` with a `city` form field.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::header,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::debug;
use weather_core::{WeatherEnvelope, WeatherService};

const BODY_LIMIT: usize = 16 * 1024;

#[derive(Debug, Deserialize)]
pub struct CityForm {
    pub city: Option<String>,
}

pub fn router(service: Arc<WeatherService>) -> Router {
    Router::new()
        .route("/weather", post(handle_weather))
        .route("/health", get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(service)
}

/// POST /weather: always answers 200 with the JSON envelope.
///
/// A body that cannot be read as a form counts as a missing `city`.
async fn handle_weather(
    State(service): State<Arc<WeatherService>>,
    req: Request,
) -> Json<WeatherEnvelope> {
    let city = city_field(req).await;
    Json(service.respond(city.as_deref()).await)
}

/// The `city` field of a urlencoded or multipart body.
async fn city_field(req: Request) -> Option<String> {
    let multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if multipart {
        let mut form = Multipart::from_request(req, &())
            .await
            .inspect_err(|rejection| debug!(%rejection, "unreadable multipart body"))
            .ok()?;
        while let Some(field) = form.next_field().await.ok().flatten() {
            if field.name() == Some("city") {
                return field.text().await.ok();
            }
        }
        return None;
    }

    match Form::<CityForm>::from_request(req, &()).await {
        Ok(Form(form)) => form.city,
        Err(rejection) => {
            debug!(%rejection, "unreadable form body");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use weather_core::{
        Config, WeatherError, WeatherProvider, WeatherQuery,
        provider::openweather::{OwCurrentResponse, OwMain, OwWeather, OwWind},
    };

    #[derive(Debug)]
    struct FixedProvider {
        result: Result<OwCurrentResponse, WeatherError>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        async fn current_weather(
            &self,
            _query: &WeatherQuery,
        ) -> Result<OwCurrentResponse, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn counted_app(result: Result<OwCurrentResponse, WeatherError>) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FixedProvider {
            result,
            calls: calls.clone(),
        };
        let service = WeatherService::new(Config::default(), Box::new(provider));
        (router(Arc::new(service)), calls)
    }

    fn app(result: Result<OwCurrentResponse, WeatherError>) -> Router {
        counted_app(result).0
    }

    fn clear_sky() -> OwCurrentResponse {
        OwCurrentResponse {
            weather: vec![OwWeather {
                id: Some(800),
                description: Some("derült égbolt".into()),
            }],
            main: Some(OwMain {
                temp: Some(15.2),
                humidity: Some(60),
            }),
            wind: Some(OwWind {
                speed: Some(5.0),
                deg: Some(90.0),
            }),
            ..OwCurrentResponse::default()
        }
    }

    fn form_post(body: impl Into<String>) -> Request<Body> {
        post_with_type(Some("application/x-www-form-urlencoded"), body)
    }

    fn post_with_type(content_type: Option<&str>, body: impl Into<String>) -> Request<Body> {
        let mut req = Request::builder().method("POST").uri("/weather");
        if let Some(content_type) = content_type {
            req = req.header(header::CONTENT_TYPE, content_type);
        }
        req.body(Body::from(body.into())).unwrap()
    }

    async fn envelope(app: Router, req: Request<Body>) -> WeatherEnvelope {
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_city_returns_html() {
        let env = envelope(app(Ok(clear_sky())), form_post("city=Budapest")).await;

        assert_eq!(env.error_message, "");
        assert!(env.weather_data.contains("<h2>Budapest időjárása</h2>"));
        assert!(env.weather_data.contains("szélirány: K"));
    }

    #[tokio::test]
    async fn accented_city_is_url_decoded() {
        let env = envelope(
            app(Ok(clear_sky())),
            form_post("city=Sz%C3%A9kesfeh%C3%A9rv%C3%A1r"),
        )
        .await;

        assert!(env.weather_data.contains("Székesfehérvár"));
    }

    #[tokio::test]
    async fn empty_or_missing_city_is_an_error() {
        for body in ["city=", "other=1"] {
            let env = envelope(app(Ok(clear_sky())), form_post(body)).await;
            assert_eq!(env.weather_data, "");
            assert!(!env.error_message.is_empty());
        }
    }

    #[tokio::test]
    async fn multipart_form_is_accepted() {
        let body = "--XyZ\r\n\
                    Content-Disposition: form-data; name=\"city\"\r\n\r\n\
                    Budapest\r\n\
                    --XyZ--\r\n";
        let env = envelope(
            app(Ok(clear_sky())),
            post_with_type(Some("multipart/form-data; boundary=XyZ"), body),
        )
        .await;

        assert_eq!(env.error_message, "");
        assert!(env.weather_data.contains("<h2>Budapest időjárása</h2>"));
    }

    #[tokio::test]
    async fn multipart_without_city_is_an_error() {
        let body = "--XyZ\r\n\
                    Content-Disposition: form-data; name=\"town\"\r\n\r\n\
                    Budapest\r\n\
                    --XyZ--\r\n";
        let (app, calls) = counted_app(Ok(clear_sky()));
        let env = envelope(
            app,
            post_with_type(Some("multipart/form-data; boundary=XyZ"), body),
        )
        .await;

        assert_eq!(env.weather_data, "");
        assert!(!env.error_message.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unreadable_bodies_get_the_json_envelope() {
        let cases = [
            post_with_type(None, "city=Budapest"),
            post_with_type(Some("text/plain"), "city=Budapest"),
            form_post("city=Budapest&city=Pecs"),
        ];
        for req in cases {
            let (app, calls) = counted_app(Ok(clear_sky()));
            let env = envelope(app, req).await;
            assert_eq!(env.weather_data, "");
            assert!(env.error_message.contains("Invalid city name"));
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn oversized_body_is_an_error_without_lookup() {
        let body = format!("city={}", "a".repeat(BODY_LIMIT + 1));
        let (app, calls) = counted_app(Ok(clear_sky()));

        let env = envelope(app, form_post(body)).await;

        assert_eq!(env.weather_data, "");
        assert!(!env.error_message.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upstream_failure_is_an_error() {
        let env = envelope(
            app(Err(WeatherError::UpstreamUnavailable("could not connect".into()))),
            form_post("city=Budapest"),
        )
        .await;

        assert_eq!(env.weather_data, "");
        assert!(env.error_message.contains("unreachable"));
    }

    #[tokio::test]
    async fn get_is_not_allowed() {
        let req = Request::builder()
            .uri("/weather?city=Budapest")
            .body(Body::empty())
            .unwrap();
        let res = app(Ok(clear_sky())).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn health_check() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let res = app(Ok(clear_sky())).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
