use anyhow::Result;
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempconvert_gateway::api::test::spawn;
use tempconvert_gateway::config::RemoteSettings;
use tempconvert_gateway::core::TemperatureConverter;
use tempconvert_gateway::{AppState, ConversionClient, GatewayError, RemoteCallError, SoapConverter};

const NAMESPACE: &str = "https://www.w3schools.com/xml/";

fn wsdl(location: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<wsdl:definitions xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/" xmlns:tns="{ns}" xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/" targetNamespace="{ns}">
  <wsdl:portType name="TempConvertSoap">
    <wsdl:operation name="FahrenheitToCelsius"><wsdl:input message="tns:FahrenheitToCelsiusSoapIn" /></wsdl:operation>
    <wsdl:operation name="CelsiusToFahrenheit"><wsdl:input message="tns:CelsiusToFahrenheitSoapIn" /></wsdl:operation>
  </wsdl:portType>
  <wsdl:binding name="TempConvertSoap" type="tns:TempConvertSoap">
    <soap:binding transport="http://schemas.xmlsoap.org/soap/http" />
    <wsdl:operation name="FahrenheitToCelsius">
      <soap:operation soapAction="{ns}FahrenheitToCelsius" style="document" />
    </wsdl:operation>
    <wsdl:operation name="CelsiusToFahrenheit">
      <soap:operation soapAction="{ns}CelsiusToFahrenheit" style="document" />
    </wsdl:operation>
  </wsdl:binding>
  <wsdl:service name="TempConvert">
    <wsdl:port name="TempConvertSoap" binding="tns:TempConvertSoap">
      <soap:address location="{location}" />
    </wsdl:port>
  </wsdl:service>
</wsdl:definitions>"#,
        ns = NAMESPACE,
        location = location
    )
}

fn soap_result(operation: &str, value: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <{op}Response xmlns="{ns}"><{op}Result>{value}</{op}Result></{op}Response>
  </soap:Body>
</soap:Envelope>"#,
        op = operation,
        ns = NAMESPACE,
        value = value
    )
}

const SOAP_FAULT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>Server was unable to process request.</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

fn settings_for(server: &MockServer) -> RemoteSettings {
    RemoteSettings {
        wsdl_url: server.url("/tempconvert.asmx?WSDL"),
        endpoint: None,
        timeout: Duration::from_secs(5),
    }
}

fn mock_wsdl(server: &MockServer) -> httpmock::Mock<'_> {
    let body = wsdl(&server.url("/tempconvert.asmx"));
    server.mock(|when, then| {
        when.method(GET).path("/tempconvert.asmx");
        then.status(200)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(body);
    })
}

#[tokio::test]
async fn connect_loads_description_and_calls_operations() -> Result<()> {
    let server = MockServer::start();
    let wsdl_mock = mock_wsdl(&server);

    let ftc_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/tempconvert.asmx")
            .body_contains("<Fahrenheit>98.6</Fahrenheit>");
        then.status(200)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(soap_result("FahrenheitToCelsius", "37"));
    });
    let ctf_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/tempconvert.asmx")
            .body_contains("<Celsius>-40</Celsius>");
        then.status(200)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(soap_result("CelsiusToFahrenheit", "-40"));
    });

    let converter = SoapConverter::connect(&settings_for(&server)).await?;
    assert_eq!(converter.endpoint(), server.url("/tempconvert.asmx"));

    assert_eq!(converter.fahrenheit_to_celsius("98.6").await?, "37");
    assert_eq!(converter.celsius_to_fahrenheit("-40").await?, "-40");

    wsdl_mock.assert();
    ftc_mock.assert();
    ctf_mock.assert();
    Ok(())
}

#[tokio::test]
async fn remote_result_is_returned_verbatim() -> Result<()> {
    let server = MockServer::start();
    mock_wsdl(&server);
    server.mock(|when, then| {
        when.method(POST).path("/tempconvert.asmx");
        then.status(200).body(soap_result("FahrenheitToCelsius", "Error"));
    });

    let converter = SoapConverter::connect(&settings_for(&server)).await?;
    assert_eq!(converter.fahrenheit_to_celsius("not a number").await?, "Error");
    Ok(())
}

#[tokio::test]
async fn soap_fault_becomes_remote_error() -> Result<()> {
    let server = MockServer::start();
    mock_wsdl(&server);
    server.mock(|when, then| {
        when.method(POST).path("/tempconvert.asmx");
        then.status(500)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(SOAP_FAULT);
    });

    let converter = SoapConverter::connect(&settings_for(&server)).await?;
    let err = converter.celsius_to_fahrenheit("0").await.unwrap_err();
    assert_eq!(
        err,
        RemoteCallError::Fault {
            code: "soap:Server".to_string(),
            message: "Server was unable to process request.".to_string(),
        }
    );
    Ok(())
}

#[tokio::test]
async fn slow_remote_call_times_out() -> Result<()> {
    let server = MockServer::start();
    mock_wsdl(&server);
    server.mock(|when, then| {
        when.method(POST).path("/tempconvert.asmx");
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(soap_result("FahrenheitToCelsius", "0"));
    });

    let mut settings = settings_for(&server);
    settings.timeout = Duration::from_secs(1);
    let converter = SoapConverter::connect(&settings).await?;

    let err = converter.fahrenheit_to_celsius("32").await.unwrap_err();
    assert_eq!(err, RemoteCallError::Timeout);
    Ok(())
}

#[tokio::test]
async fn endpoint_override_wins_over_description() -> Result<()> {
    let server = MockServer::start();
    mock_wsdl(&server);
    let override_mock = server.mock(|when, then| {
        when.method(POST).path("/other.asmx");
        then.status(200).body(soap_result("CelsiusToFahrenheit", "212"));
    });

    let mut settings = settings_for(&server);
    settings.endpoint = Some(server.url("/other.asmx"));
    let converter = SoapConverter::connect(&settings).await?;

    assert_eq!(converter.celsius_to_fahrenheit("100").await?, "212");
    override_mock.assert();
    Ok(())
}

#[tokio::test]
async fn unreachable_description_is_fatal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/tempconvert.asmx");
        then.status(404);
    });

    let result = SoapConverter::connect(&settings_for(&server)).await;
    assert!(matches!(result, Err(GatewayError::HttpError(_))));
}

#[tokio::test]
async fn description_without_operations_is_fatal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/tempconvert.asmx");
        then.status(200).body(format!(
            r#"<definitions targetNamespace="{}"><portType name="Empty"></portType></definitions>"#,
            NAMESPACE
        ));
    });

    let result = SoapConverter::connect(&settings_for(&server)).await;
    assert!(matches!(result, Err(GatewayError::BindingError { .. })));
}

#[tokio::test]
async fn end_to_end_batch_through_gateway() -> Result<()> {
    let server = MockServer::start();
    mock_wsdl(&server);
    for (input, output) in [("0", "32"), ("100", "212")] {
        let needle = format!("<Celsius>{}</Celsius>", input);
        let body = soap_result("CelsiusToFahrenheit", output);
        server.mock(move |when, then| {
            when.method(POST).path("/tempconvert.asmx").body_contains(&needle);
            then.status(200).body(body);
        });
    }
    server.mock(|when, then| {
        when.method(POST)
            .path("/tempconvert.asmx")
            .body_contains("<Celsius>warm</Celsius>");
        then.status(500).body(SOAP_FAULT);
    });

    let converter = SoapConverter::connect(&settings_for(&server)).await?;
    let state = AppState::ready(ConversionClient::new(Arc::new(converter)));
    let (addr, _h) = spawn(state).await?;

    let body: Value = reqwest::Client::new()
        .post(format!("http://{}/convert/batch", addr))
        .json(&json!({"temperatures": ["0", "warm", "100"], "fromUnit": "Celsius"}))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(
        body,
        json!({
            "results": [
                "0°C = 32°F",
                "Error converting warm: SOAP fault soap:Server: Server was unable to process request.",
                "100°C = 212°F"
            ],
            "totalConverted": 2,
            "totalErrors": 1
        })
    );
    Ok(())
}
