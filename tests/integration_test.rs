use jucha::api::Provider;
use jucha::config::Config;
use jucha::tools::{NearbySearchRequest, ParkingInfoRequest};

#[test]
fn test_provider_from_str() {
    assert_eq!(Provider::from_str("kakao"), Some(Provider::Kakao));
    assert_eq!(Provider::from_str("seoul"), Some(Provider::Seoul));
    assert_eq!(Provider::from_str("gg"), Some(Provider::Gyeonggi));
    assert_eq!(Provider::from_str("registry"), Some(Provider::Molit));
    assert_eq!(Provider::from_str("invalid"), None);
}

#[test]
fn test_provider_display_name() {
    assert_eq!(Provider::Kakao.display_name(), "카카오 로컬");
    assert_eq!(Provider::Seoul.display_name(), "서울 열린데이터광장");
    assert_eq!(Provider::Gyeonggi.display_name(), "경기데이터드림");
}

#[test]
fn test_nearby_request_default() {
    let request = NearbySearchRequest::default();
    assert_eq!(request.radius, 1000.0);
    assert!(request.address.is_none());
    assert!(request.latitude.is_none());
}

#[test]
fn test_config_path() {
    let path = Config::config_path();
    assert!(path.is_ok());
    assert!(path.unwrap().to_string_lossy().contains(".jucha"));
}

mod tool_flows {
    use super::*;
    use jucha::api::client::ClientConfig;
    use jucha::api::gyeonggi::GyeonggiDataClient;
    use jucha::api::kakao::KakaoLocalClient;
    use jucha::api::seoul::SeoulOpenDataClient;
    use jucha::tools::ParkingTools;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::Value;

    const KAKAO_KEY: &str = "test_kakao_key";
    const SEOUL_KEY: &str = "test_seoul_key";
    const GG_KEY: &str = "test_gg_key";

    const KEYWORD_PATH: &str = "/v2/local/search/keyword.json";
    const ADDRESS_PATH: &str = "/v2/local/search/address.json";

    fn tools_against(server: &ServerGuard) -> ParkingTools {
        tools_with_keys(server, KAKAO_KEY, SEOUL_KEY, GG_KEY)
    }

    fn tools_with_keys(
        server: &ServerGuard,
        kakao_key: &str,
        seoul_key: &str,
        gg_key: &str,
    ) -> ParkingTools {
        let config = |key: &str| ClientConfig {
            api_key: key.to_string(),
            base_url: server.url(),
            ..Default::default()
        };
        ParkingTools::new(
            KakaoLocalClient::new(config(kakao_key)).unwrap(),
            SeoulOpenDataClient::new(config(seoul_key)).unwrap(),
            GyeonggiDataClient::new(config(gg_key)).unwrap(),
        )
    }

    fn keyword_body_three_regions() -> String {
        serde_json::json!({
            "documents": [
                {
                    "place_name": "세종로 공영주차장",
                    "address_name": "서울 종로구 세종로 80-1",
                    "road_address_name": "서울 종로구 사직로 130",
                    "distance": "231",
                    "phone": "02-735-9500",
                    "category_name": "교통,수송 > 교통시설 > 주차장",
                    "x": "126.9769",
                    "y": "37.5759"
                },
                {
                    "place_name": "수원시청 주차장",
                    "address_name": "경기도 수원시 팔달구 효원로 241",
                    "road_address_name": "",
                    "distance": "540",
                    "phone": "",
                    "category_name": "교통,수송 > 교통시설 > 주차장",
                    "x": "127.0286",
                    "y": "37.2636"
                },
                {
                    "place_name": "해운대 공영주차장",
                    "address_name": "부산 해운대구 우동 620-5",
                    "road_address_name": "",
                    "distance": "980",
                    "phone": "",
                    "category_name": "교통,수송 > 교통시설 > 주차장",
                    "x": "129.1604",
                    "y": "35.1631"
                }
            ]
        })
        .to_string()
    }

    fn seoul_feed_body() -> String {
        serde_json::json!({
            "GetParkingInfo": {
                "list_total_count": 1,
                "RESULT": {"CODE": "INFO-000", "MESSAGE": "정상 처리되었습니다"},
                "row": [
                    {
                        "PKLT_NM": "세종로 공영주차장",
                        "ADDR": "종로구 세종로 80-1",
                        "TPKCT": 100,
                        "NOW_PRK_VHCL_CNT": 30,
                        "NOW_PRK_VHCL_UPDT_TM": "2025-07-14 22:03:10",
                        "OPER_SE_NM": "시간제 주차장",
                        "PRK_STTS_NM": "운영중",
                        "WD_OPER_BGNG_TM": "0000",
                        "WD_OPER_END_TM": "2400",
                        "PAY_YN_NM": "유료",
                        "BSC_PRK_CRG": 430,
                        "BSC_PRK_HR": 5,
                        "ADD_PRK_CRG": 430,
                        "ADD_PRK_HR": 5,
                        "DAY_MAX_CRG": 26000,
                        "PRD_AMT": 150000
                    }
                ]
            }
        })
        .to_string()
    }

    fn gyeonggi_feed_body() -> String {
        serde_json::json!({
            "ParkingPlace": [
                {"head": [
                    {"list_total_count": 1},
                    {"RESULT": {"CODE": "INFO-000", "MESSAGE": "정상 처리되었습니다."}},
                    {"api_version": "1.0"}
                ]},
                {"row": [
                    {
                        "PARKPLC_NM": "수원시청 주차장",
                        "LOCPLC_ROADNM_ADDR": "경기도 수원시 팔달구 효원로 241",
                        "PARKNG_COMPRT_PLANE_CNT": "120",
                        "WKDAY_OPERT_BEGIN_TM": "09:00",
                        "WKDAY_OPERT_END_TM": "18:00",
                        "SAT_OPERT_BEGIN_TM": "09:00",
                        "SAT_OPERT_END_TM": "13:00",
                        "CHRG_INFO": "무료",
                        "PARKNG_BASIS_TM": 0,
                        "PARKNG_BASIS_USE_CHRG": 0,
                        "SETTLE_METH": ""
                    }
                ]}
            ]
        })
        .to_string()
    }

    async fn mock_seoul_feed(server: &mut ServerGuard) -> mockito::Mock {
        server
            .mock(
                "GET",
                format!("/{SEOUL_KEY}/json/GetParkingInfo/1/1000").as_str(),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(seoul_feed_body())
            .create_async()
            .await
    }

    async fn mock_gyeonggi_feed(server: &mut ServerGuard) -> mockito::Mock {
        server
            .mock("GET", "/Parking")
            .match_query(Matcher::UrlEncoded("KEY".to_string(), GG_KEY.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(gyeonggi_feed_body())
            .create_async()
            .await
    }

    #[tokio::test]
    async fn nearby_by_coordinates_merges_all_regions() {
        let mut server = Server::new_async().await;
        let _kakao = server
            .mock("GET", KEYWORD_PATH)
            .match_header("authorization", format!("KakaoAK {KAKAO_KEY}").as_str())
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".to_string(), "주차장".to_string()),
                Matcher::UrlEncoded("category_group_code".to_string(), "PK6".to_string()),
                Matcher::UrlEncoded("radius".to_string(), "1000".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(keyword_body_three_regions())
            .create_async()
            .await;
        let _seoul = mock_seoul_feed(&mut server).await;
        let _gg = mock_gyeonggi_feed(&mut server).await;

        let tools = tools_against(&server);
        let response = tools
            .search_nearby_parking(&NearbySearchRequest {
                latitude: Some(37.5665),
                longitude: Some(126.978),
                ..Default::default()
            })
            .await;

        assert!(response.success);
        assert_eq!(response.count, 3);
        assert!(response.notice.is_some(), "Busan facility must trigger the notice");

        let payload = serde_json::to_value(&response).unwrap();
        let parkings = payload["parkings"].as_array().unwrap();

        // Seoul: live occupancy from the feed
        assert_eq!(parkings[0]["available_spots"], Value::from(70));
        assert_eq!(parkings[0]["total_spots"], Value::from(100));
        assert_eq!(parkings[0]["update_time"], Value::from("2025-07-14 22:03:10"));
        assert_eq!(parkings[0]["fee_info"]["daily_max_fee"], Value::from(26000));

        // Gyeonggi: capacity and schedules, never live occupancy
        assert_eq!(parkings[1]["available_spots"], Value::Null);
        assert_eq!(parkings[1]["total_spots"], Value::from(120));
        assert!(parkings[1].get("update_time").is_none());
        assert_eq!(parkings[1]["fee_info"]["is_paid"], Value::from("무료"));
        assert_eq!(parkings[1]["operating_info"]["saturday_start"], Value::from("09:00"));

        // Other region: base info only
        assert_eq!(parkings[2]["available_spots"], Value::Null);
        assert!(parkings[2].get("operating_info").is_none());
        assert!(parkings[2].get("fee_info").is_none());
    }

    #[tokio::test]
    async fn nearby_by_address_geocodes_first() {
        let mut server = Server::new_async().await;
        let _geocode = server
            .mock("GET", ADDRESS_PATH)
            .match_query(Matcher::UrlEncoded(
                "query".to_string(),
                "서울시 중구 세종대로 110".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"documents": [{"y": "37.5665", "x": "126.9780"}]}"#)
            .create_async()
            .await;
        let _kakao = server
            .mock("GET", KEYWORD_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("y".to_string(), "37.5665".to_string()),
                Matcher::UrlEncoded("x".to_string(), "126.978".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(keyword_body_three_regions())
            .create_async()
            .await;
        let _seoul = mock_seoul_feed(&mut server).await;
        let _gg = mock_gyeonggi_feed(&mut server).await;

        let tools = tools_against(&server);
        let response = tools
            .search_nearby_parking(&NearbySearchRequest {
                address: Some("서울시 중구 세종대로 110".to_string()),
                ..Default::default()
            })
            .await;

        assert!(response.success);
        assert_eq!(response.count, 3);
        assert_eq!(
            response.parkings[0].available_spots,
            Some(70),
            "Seoul facility with a feed match carries live availability"
        );
    }

    #[tokio::test]
    async fn nearby_geocode_miss_returns_not_found_payload() {
        let mut server = Server::new_async().await;
        let _geocode = server
            .mock("GET", ADDRESS_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"documents": []}"#)
            .create_async()
            .await;

        let tools = tools_against(&server);
        let response = tools
            .search_nearby_parking(&NearbySearchRequest {
                address: Some("존재하지 않는 주소 999".to_string()),
                ..Default::default()
            })
            .await;

        assert!(!response.success);
        let error = response.error.unwrap();
        assert!(error.contains("존재하지 않는 주소 999"));
        assert!(error.contains("찾을 수 없습니다"));
        assert_eq!(response.count, 0);
    }

    #[tokio::test]
    async fn validation_failures_issue_no_network_calls() {
        let mut server = Server::new_async().await;
        let guard = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let tools = tools_against(&server);

        // Neither address nor coordinates
        let response = tools
            .search_nearby_parking(&NearbySearchRequest::default())
            .await;
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("주소 또는 좌표(위도, 경도)를 제공해주세요.")
        );
        assert_eq!(response.count, 0);
        assert!(response.parkings.is_empty());

        // Latitude out of range
        let response = tools
            .search_nearby_parking(&NearbySearchRequest {
                latitude: Some(91.0),
                longitude: Some(0.0),
                ..Default::default()
            })
            .await;
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("유효하지 않은 위치 정보입니다. 확인 후 다시 시도해주세요.")
        );

        // Non-positive radius
        let response = tools
            .search_nearby_parking(&NearbySearchRequest {
                latitude: Some(37.5),
                longitude: Some(127.0),
                radius: 0.0,
                ..Default::default()
            })
            .await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("검색 반경은 0보다 커야 합니다."));

        // Blank facility name
        let response = tools
            .get_parking_info(&ParkingInfoRequest {
                parking_name: "  ".to_string(),
                address: None,
            })
            .await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("주차장 이름을 입력해주세요."));

        guard.assert_async().await;
    }

    #[tokio::test]
    async fn seoul_feed_fetched_once_per_invocation() {
        let mut server = Server::new_async().await;
        // Two Seoul facilities in one search
        let _kakao = server
            .mock("GET", KEYWORD_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "documents": [
                        {
                            "place_name": "세종로 공영주차장",
                            "address_name": "서울 종로구 세종로 80-1",
                            "category_name": "주차장",
                            "distance": "100"
                        },
                        {
                            "place_name": "세종로 공영주차장 별관",
                            "address_name": "서울 종로구 세종로 80-2",
                            "category_name": "주차장",
                            "distance": "150"
                        }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;
        let seoul_mock = mock_seoul_feed(&mut server).await;

        let tools = tools_against(&server);
        let response = tools
            .search_nearby_parking(&NearbySearchRequest {
                latitude: Some(37.5759),
                longitude: Some(126.9769),
                ..Default::default()
            })
            .await;

        assert!(response.success);
        assert_eq!(response.count, 2);
        // Both candidates match the same feed row by name containment, so the
        // shared snapshot yields identical per-facility results
        assert_eq!(response.parkings[0].available_spots, Some(70));
        assert_eq!(response.parkings[1].available_spots, Some(70));

        // The feed endpoint was hit exactly once despite two Seoul facilities
        seoul_mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_feed_credential_degrades_to_base_info() {
        let mut server = Server::new_async().await;
        let _kakao = server
            .mock("GET", KEYWORD_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(keyword_body_three_regions())
            .create_async()
            .await;
        let _gg = mock_gyeonggi_feed(&mut server).await;

        // Seoul key absent: Seoul facilities fall back to base info only
        let tools = tools_with_keys(&server, KAKAO_KEY, "", GG_KEY);
        let response = tools
            .search_nearby_parking(&NearbySearchRequest {
                latitude: Some(37.5665),
                longitude: Some(126.978),
                ..Default::default()
            })
            .await;

        assert!(response.success, "feed failures never abort the search");
        assert_eq!(response.count, 3);
        assert_eq!(response.parkings[0].available_spots, None);
        assert!(response.parkings[0].operating_info.is_none());
        // Gyeonggi lookup is unaffected by the Seoul failure
        assert_eq!(response.parkings[1].total_spots, Some(120));
    }

    #[tokio::test]
    async fn missing_place_search_credential_is_service_not_ready() {
        let server = Server::new_async().await;
        let tools = tools_with_keys(&server, "", SEOUL_KEY, GG_KEY);

        let response = tools
            .search_nearby_parking(&NearbySearchRequest {
                latitude: Some(37.5),
                longitude: Some(127.0),
                ..Default::default()
            })
            .await;

        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("주차장 정보 제공 서비스가 준비 중입니다.")
        );
    }

    #[tokio::test]
    async fn place_search_server_error_is_generalized() {
        let mut server = Server::new_async().await;
        let _kakao = server
            .mock("GET", KEYWORD_PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let tools = tools_against(&server);
        let response = tools
            .search_nearby_parking(&NearbySearchRequest {
                latitude: Some(37.5),
                longitude: Some(127.0),
                ..Default::default()
            })
            .await;

        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("주차장 정보를 불러오는 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.")
        );
    }

    #[tokio::test]
    async fn empty_place_results_is_an_advisory_success() {
        let mut server = Server::new_async().await;
        let _kakao = server
            .mock("GET", KEYWORD_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"documents": []}"#)
            .create_async()
            .await;

        let tools = tools_against(&server);
        let response = tools
            .search_nearby_parking(&NearbySearchRequest {
                latitude: Some(37.5),
                longitude: Some(127.0),
                ..Default::default()
            })
            .await;

        assert!(response.success);
        assert_eq!(response.count, 0);
        assert_eq!(
            response.message.as_deref(),
            Some("주변에서 주차장을 찾을 수 없습니다. 검색 범위를 넓혀보세요.")
        );
        assert!(response.notice.is_none());
    }

    #[tokio::test]
    async fn info_merges_realtime_for_matched_facility() {
        let mut server = Server::new_async().await;
        let _kakao = server
            .mock("GET", KEYWORD_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".to_string(), "세종로 공영주차장".to_string()),
                Matcher::UrlEncoded("category_group_code".to_string(), "PK6".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(keyword_body_three_regions())
            .create_async()
            .await;
        let _seoul = mock_seoul_feed(&mut server).await;

        let tools = tools_against(&server);
        let response = tools
            .get_parking_info(&ParkingInfoRequest {
                parking_name: "세종로 공영주차장".to_string(),
                address: None,
            })
            .await;

        assert!(response.success);
        let facility = response.facility.unwrap();
        assert_eq!(facility.name, "세종로 공영주차장");
        assert_eq!(facility.available_spots, Some(70));
        assert_eq!(facility.update_time.as_deref(), Some("2025-07-14 22:03:10"));

        // success flag flattens next to the facility fields
        let payload = serde_json::to_value(
            tools
                .get_parking_info(&ParkingInfoRequest {
                    parking_name: "세종로 공영주차장".to_string(),
                    address: None,
                })
                .await,
        )
        .unwrap();
        assert_eq!(payload["success"], Value::Bool(true));
        assert_eq!(payload["name"], Value::from("세종로 공영주차장"));
    }

    #[tokio::test]
    async fn info_falls_back_to_first_result() {
        let mut server = Server::new_async().await;
        let _kakao = server
            .mock("GET", KEYWORD_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "documents": [{
                        "place_name": "해운대 공영주차장",
                        "address_name": "부산 해운대구 우동 620-5",
                        "category_name": "주차장"
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let tools = tools_against(&server);
        let response = tools
            .get_parking_info(&ParkingInfoRequest {
                parking_name: "전혀 다른 주차장".to_string(),
                address: None,
            })
            .await;

        assert!(response.success);
        let facility = response.facility.unwrap();
        assert_eq!(facility.name, "해운대 공영주차장");
        assert_eq!(facility.available_spots, None);
    }

    #[tokio::test]
    async fn info_with_no_results_is_not_found() {
        let mut server = Server::new_async().await;
        let _kakao = server
            .mock("GET", KEYWORD_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"documents": []}"#)
            .create_async()
            .await;

        let tools = tools_against(&server);
        let response = tools
            .get_parking_info(&ParkingInfoRequest {
                parking_name: "유령 주차장".to_string(),
                address: None,
            })
            .await;

        assert!(!response.success);
        let error = response.error.unwrap();
        assert!(error.contains("유령 주차장"));
        assert!(error.contains("찾을 수 없습니다"));
    }
}
