// Copyright 2024-2026, NVIDIA CORPORATION & AFFILIATES. All rights reserved.
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions
// are met:
//  * Redistributions of source code must retain the above copyright
//    notice, this list of conditions and the following disclaimer.
//  * Redistributions in binary form must reproduce the above copyright
//    notice, this list of conditions and the following disclaimer in the
//    documentation and/or other materials provided with the distribution.
//  * Neither the name of NVIDIA CORPORATION nor the names of its
//    contributors may be used to endorse or promote products derived
//    from this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS ``AS IS'' AND ANY
// EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
// PURPOSE ARE DISCLAIMED.  IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY
// OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
// (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Integration tests for the REST <-> gRPC tensor codec.
//!
//! These drive the marshaler facade end-to-end without a backend: request
//! bodies decode into `ModelInferRequest` messages compared proto-equal to
//! fixed baselines, and `ModelInferResponse` messages marshal into exact
//! REST JSON bodies.

use std::collections::HashMap;

use kserve_gateway::generated::inference::infer_parameter::ParameterChoice;
use kserve_gateway::generated::inference::model_infer_request::InferInputTensor;
use kserve_gateway::generated::inference::model_infer_response::InferOutputTensor;
use kserve_gateway::generated::inference::{
    InferParameter, InferTensorContents, ModelInferRequest, ModelInferResponse,
};
use kserve_gateway::marshaler::JsonMarshaler;

fn string_param(value: &str) -> InferParameter {
    InferParameter {
        parameter_choice: Some(ParameterChoice::StringParam(value.to_owned())),
    }
}

fn int_param(value: i64) -> InferParameter {
    InferParameter {
        parameter_choice: Some(ParameterChoice::Int64Param(value)),
    }
}

fn bool_param(value: bool) -> InferParameter {
    InferParameter {
        parameter_choice: Some(ParameterChoice::BoolParam(value)),
    }
}

fn nil_param() -> InferParameter {
    InferParameter {
        parameter_choice: None,
    }
}

// ---------------------------------------------------------------------------
// Request decoding
// ---------------------------------------------------------------------------

/// The FP32 baseline vector: two identical row-major halves of 64 values.
fn baseline_values() -> Vec<f32> {
    let row: [f32; 64] = [
        0.0, 0.0, 1.0, 11.0, 14.0, 15.0, 3.0, 0.0, 0.0, 1.0, 13.0, 16.0, 12.0, 16.0, 8.0, 0.0,
        0.0, 8.0, 16.0, 4.0, 6.0, 16.0, 5.0, 0.0, 0.0, 5.0, 15.0, 11.0, 13.0, 14.0, 0.0, 0.0, 0.0,
        0.0, 2.0, 12.0, 16.0, 13.0, 0.0, 0.0, 0.0, 0.0, 0.0, 13.0, 16.0, 16.0, 6.0, 0.0, 0.0, 0.0,
        0.0, 16.0, 16.0, 16.0, 7.0, 0.0, 0.0, 0.0, 0.0, 11.0, 13.0, 12.0, 1.0, 0.0,
    ];
    let mut values = row.to_vec();
    values.extend_from_slice(&row);
    values
}

/// Renders `values` as a JSON array nested to match `shape` (row-major).
fn nested_json(values: &[f32], shape: &[i64]) -> String {
    if shape.len() <= 1 {
        let elements: Vec<String> = values.iter().map(|v| format!("{v:.1}")).collect();
        return format!("[{}]", elements.join(", "));
    }
    let chunk = values.len() / shape[0] as usize;
    let inner: Vec<String> = values
        .chunks(chunk)
        .map(|c| nested_json(c, &shape[1..]))
        .collect();
    format!("[{}]", inner.join(", "))
}

fn rest_request(data: &str, shape: &str) -> String {
    format!(
        r#"{{
        "id": "foo",
        "parameters": {{
            "top_level": "foo",
            "bool_param": false
        }},
        "inputs": [{{
            "name": "predict",
            "shape": {shape},
            "datatype": "FP32",
            "data": {data},
            "parameters": {{
                "content_type": "str",
                "headers": null,
                "int_param": 42,
                "bool_param": true
            }}
        }}]
    }}"#
    )
}

fn expected_request(shape: &[i64]) -> ModelInferRequest {
    let mut input_parameters = HashMap::new();
    input_parameters.insert("content_type".to_owned(), string_param("str"));
    input_parameters.insert("headers".to_owned(), nil_param());
    input_parameters.insert("int_param".to_owned(), int_param(42));
    input_parameters.insert("bool_param".to_owned(), bool_param(true));

    let mut parameters = HashMap::new();
    parameters.insert("top_level".to_owned(), string_param("foo"));
    parameters.insert("bool_param".to_owned(), bool_param(false));

    ModelInferRequest {
        id: "foo".to_owned(),
        parameters,
        inputs: vec![InferInputTensor {
            name: "predict".to_owned(),
            datatype: "FP32".to_owned(),
            shape: shape.to_vec(),
            parameters: input_parameters,
            contents: Some(InferTensorContents {
                fp32_contents: baseline_values(),
                ..Default::default()
            }),
        }],
        ..Default::default()
    }
}

#[test]
fn numeric_request_decodes_at_every_rank() {
    let values = baseline_values();
    let presentations: [(String, &[i64]); 4] = [
        (nested_json(&values, &[128]), &[2, 64]), // flat form, rank-2 shape
        (nested_json(&values, &[2, 64]), &[2, 64]),
        (nested_json(&values, &[2, 2, 32]), &[2, 2, 32]),
        (nested_json(&values, &[2, 2, 2, 16]), &[2, 2, 2, 16]),
    ];
    for (data, shape) in presentations {
        let shape_json = serde_json::to_string(shape).unwrap();
        let body = rest_request(&data, &shape_json);
        let decoded = JsonMarshaler
            .decode_infer_request(body.as_bytes())
            .unwrap_or_else(|e| panic!("decode failed for shape {shape:?}: {e}"));
        assert_eq!(decoded, expected_request(shape), "shape {shape:?}");
    }
}

#[test]
fn bytes_request_variants_share_one_decoding() {
    struct Case {
        shape: &'static [i64],
        json_data: &'static str,
        content_type: Option<&'static str>,
        expected: &'static [&'static [u8]],
    }
    let cases = [
        Case {
            shape: &[2],
            json_data: r#"["My UTF8 String", "Another string"]"#,
            content_type: None,
            expected: &[b"My UTF8 String", b"Another string"],
        },
        Case {
            shape: &[1],
            json_data: "[[77, 121, 32, 85, 84, 70, 56, 32, 83, 116, 114, 105, 110, 103]]",
            content_type: None,
            expected: &[b"My UTF8 String"],
        },
        Case {
            shape: &[2, 1],
            json_data: r#"[["String1"], ["String2"]]"#,
            content_type: None,
            expected: &[b"String1", b"String2"],
        },
        Case {
            shape: &[2, 1],
            json_data: r#"["String1", "String2"]"#,
            content_type: Some("str"),
            expected: &[b"String1", b"String2"],
        },
        Case {
            shape: &[2, 1],
            json_data:
                "[[[83, 116, 114, 105, 110, 103, 32, 49]], [[83, 116, 114, 105, 110, 103, 32, 50]]]",
            content_type: None,
            expected: &[b"String 1", b"String 2"],
        },
        Case {
            shape: &[2, 1],
            json_data: r#"["TXkgVVRGOCBTdHJpbmc=", "QW5vdGhlciBzdHJpbmc="]"#,
            content_type: Some("base64"),
            expected: &[b"My UTF8 String", b"Another string"],
        },
    ];

    for case in &cases {
        let shape_json = serde_json::to_string(case.shape).unwrap();
        let parameters = match case.content_type {
            Some(ct) => format!(r#", "parameters": {{"content_type": "{ct}"}}"#),
            None => String::new(),
        };
        let body = format!(
            r#"{{
            "id": "foo",
            "inputs": [{{
                "name": "predict",
                "shape": {shape_json},
                "datatype": "BYTES",
                "data": {data}{parameters}
            }}]
        }}"#,
            data = case.json_data,
        );

        let decoded = JsonMarshaler
            .decode_infer_request(body.as_bytes())
            .unwrap_or_else(|e| panic!("decode failed for {}: {e}", case.json_data));

        let mut expected_parameters = HashMap::new();
        if let Some(ct) = case.content_type {
            expected_parameters.insert("content_type".to_owned(), string_param(ct));
        }
        let expected = ModelInferRequest {
            id: "foo".to_owned(),
            inputs: vec![InferInputTensor {
                name: "predict".to_owned(),
                datatype: "BYTES".to_owned(),
                shape: case.shape.to_vec(),
                parameters: expected_parameters,
                contents: Some(InferTensorContents {
                    bytes_contents: case.expected.iter().map(|s| s.to_vec()).collect(),
                    ..Default::default()
                }),
            }],
            ..Default::default()
        };
        assert_eq!(decoded, expected, "case {}", case.json_data);
    }
}

#[test]
fn requested_outputs_are_forwarded() {
    let body = br#"{
        "inputs": [{"name": "in", "datatype": "INT32", "shape": [1], "data": [3]}],
        "outputs": [
            {"name": "out0"},
            {"name": "out1", "parameters": {"classification": "3"}}
        ]
    }"#;
    let decoded = JsonMarshaler.decode_infer_request(body).unwrap();
    assert_eq!(decoded.outputs.len(), 2);
    assert_eq!(decoded.outputs[0].name, "out0");
    assert_eq!(decoded.outputs[1].name, "out1");
    assert_eq!(
        decoded.outputs[1].parameters["classification"],
        string_param("3")
    );
}

#[test]
fn fp16_request_is_rejected() {
    let body = br#"{
        "inputs": [{"name": "half", "datatype": "FP16", "shape": [1], "data": [1.0]}]
    }"#;
    let err = JsonMarshaler.decode_infer_request(body).unwrap_err();
    assert!(err.to_string().contains("FP16"), "{err}");
}

#[test]
fn unknown_datatype_request_is_rejected() {
    let body = br#"{
        "inputs": [{"name": "odd", "datatype": "COMPLEX64", "shape": [1], "data": [1]}]
    }"#;
    let err = JsonMarshaler.decode_infer_request(body).unwrap_err();
    assert!(err.to_string().contains("unsupported datatype"), "{err}");
}

#[test]
fn element_count_must_match_shape() {
    let body = br#"{
        "inputs": [{"name": "in", "datatype": "INT32", "shape": [4], "data": [1, 2, 3]}]
    }"#;
    let err = JsonMarshaler.decode_infer_request(body).unwrap_err();
    assert!(err.to_string().contains("3 elements"), "{err}");
}

#[test]
fn nesting_mismatch_is_rejected() {
    // three bracket levels against a rank-2 shape
    let body = br#"{
        "inputs": [{"name": "in", "datatype": "INT32", "shape": [2, 2],
                    "data": [[[1, 2]], [[3, 4]]]}]
    }"#;
    assert!(JsonMarshaler.decode_infer_request(body).is_err());
}

#[test]
fn malformed_json_is_rejected() {
    assert!(JsonMarshaler.decode_infer_request(b"{not json").is_err());
}

// ---------------------------------------------------------------------------
// Response marshalling
// ---------------------------------------------------------------------------

fn response_parameters() -> HashMap<String, InferParameter> {
    let mut parameters = HashMap::new();
    parameters.insert("content_type".to_owned(), string_param("bar"));
    parameters.insert("headers".to_owned(), nil_param());
    parameters.insert("int_param".to_owned(), int_param(12345));
    parameters.insert("bool_param".to_owned(), bool_param(false));
    parameters
}

#[test]
fn flat_numeric_response_with_typed_contents() {
    let reply = ModelInferResponse {
        model_name: "example".to_owned(),
        id: "foo".to_owned(),
        parameters: response_parameters(),
        outputs: vec![InferOutputTensor {
            name: "predict".to_owned(),
            datatype: "INT64".to_owned(),
            shape: vec![2],
            contents: Some(InferTensorContents {
                int64_contents: vec![8, 8],
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    let body = JsonMarshaler.marshal_infer_response(&reply).unwrap();
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"{"model_name":"example","id":"foo","parameters":{"bool_param":false,"content_type":"bar","headers":null,"int_param":12345},"outputs":[{"name":"predict","datatype":"INT64","shape":[2],"data":[8,8]}]}"#
    );
}

#[test]
fn raw_bytes_numeric_response() {
    let reply = ModelInferResponse {
        model_name: "example".to_owned(),
        id: "foo".to_owned(),
        outputs: vec![InferOutputTensor {
            name: "predict".to_owned(),
            datatype: "INT64".to_owned(),
            shape: vec![1, 1],
            ..Default::default()
        }],
        raw_output_contents: vec![7i64.to_le_bytes().to_vec()],
        ..Default::default()
    };
    let body = JsonMarshaler.marshal_infer_response(&reply).unwrap();
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"{"model_name":"example","id":"foo","outputs":[{"name":"predict","datatype":"INT64","shape":[1,1],"data":[7]}]}"#
    );
}

fn expected_bytes_payload(body: &[u8]) {
    let value: serde_json::Value = serde_json::from_slice(body).unwrap();
    let output = &value["outputs"][0];
    assert_eq!(output["parameters"]["content_type"], "base64");
    assert_eq!(
        output["data"],
        serde_json::json!([
            "U3RyaW5nMQ==",
            "U3RyaW5nMg==",
            "U3RyaW5nMw==",
            "U3RyaW5nNA=="
        ])
    );
}

#[test]
fn bytes_response_with_typed_contents() {
    let reply = ModelInferResponse {
        model_name: "example".to_owned(),
        outputs: vec![InferOutputTensor {
            name: "predict".to_owned(),
            datatype: "BYTES".to_owned(),
            shape: vec![2, 2],
            contents: Some(InferTensorContents {
                bytes_contents: vec![
                    b"String1".to_vec(),
                    b"String2".to_vec(),
                    b"String3".to_vec(),
                    b"String4".to_vec(),
                ],
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    let body = JsonMarshaler.marshal_infer_response(&reply).unwrap();
    expected_bytes_payload(&body);
}

#[test]
fn bytes_response_from_raw_frames() {
    let mut raw = Vec::new();
    for s in [&b"String1"[..], b"String2", b"String3", b"String4"] {
        raw.extend_from_slice(&(s.len() as u32).to_le_bytes());
        raw.extend_from_slice(s);
    }
    let reply = ModelInferResponse {
        model_name: "example".to_owned(),
        outputs: vec![InferOutputTensor {
            name: "predict".to_owned(),
            datatype: "BYTES".to_owned(),
            shape: vec![2, 2],
            ..Default::default()
        }],
        raw_output_contents: vec![raw],
        ..Default::default()
    };
    let body = JsonMarshaler.marshal_infer_response(&reply).unwrap();
    expected_bytes_payload(&body);
}

#[test]
fn fp16_response_is_rejected() {
    let reply = ModelInferResponse {
        model_name: "example".to_owned(),
        outputs: vec![InferOutputTensor {
            name: "half".to_owned(),
            datatype: "FP16".to_owned(),
            shape: vec![1],
            ..Default::default()
        }],
        ..Default::default()
    };
    let err = JsonMarshaler.marshal_infer_response(&reply).unwrap_err();
    assert!(err.to_string().contains("FP16"), "{err}");
}

#[test]
fn truncated_raw_bytes_are_rejected() {
    let mut raw = Vec::new();
    raw.extend_from_slice(&100u32.to_le_bytes());
    raw.extend_from_slice(b"short");
    let reply = ModelInferResponse {
        outputs: vec![InferOutputTensor {
            name: "predict".to_owned(),
            datatype: "BYTES".to_owned(),
            shape: vec![1],
            ..Default::default()
        }],
        raw_output_contents: vec![raw],
        ..Default::default()
    };
    assert!(JsonMarshaler.marshal_infer_response(&reply).is_err());
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn numeric_response_data_round_trips_into_a_request() {
    let values = vec![0.5f32, 16.0, -3.25, 0.0];
    let reply = ModelInferResponse {
        model_name: "example".to_owned(),
        outputs: vec![InferOutputTensor {
            name: "out".to_owned(),
            datatype: "FP32".to_owned(),
            shape: vec![4],
            contents: Some(InferTensorContents {
                fp32_contents: values.clone(),
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    let body = JsonMarshaler.marshal_infer_response(&reply).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let request_body = format!(
        r#"{{"inputs": [{{"name": "in", "datatype": "FP32", "shape": [4], "data": {}}}]}}"#,
        value["outputs"][0]["data"]
    );
    let decoded = JsonMarshaler
        .decode_infer_request(request_body.as_bytes())
        .unwrap();
    assert_eq!(
        decoded.inputs[0].contents.as_ref().unwrap().fp32_contents,
        values
    );
}

#[test]
fn error_from_tonic_status() {
    let status = tonic::Status::not_found("model not found");
    let err = kserve_gateway::error::Error::from(status);
    match &err {
        kserve_gateway::error::Error::Grpc { code, message } => {
            assert_eq!(*code, tonic::Code::NotFound);
            assert!(message.contains("model not found"));
        }
        other => panic!("expected Grpc error, got: {other}"),
    }
    assert!(!err.is_decode());
}

#[test]
fn utf8_bytes_round_trip_preserves_payloads() {
    let payloads: &[&[u8]] = &[b"first", b"second payload", b""];
    let reply = ModelInferResponse {
        outputs: vec![InferOutputTensor {
            name: "out".to_owned(),
            datatype: "BYTES".to_owned(),
            shape: vec![3],
            contents: Some(InferTensorContents {
                bytes_contents: payloads.iter().map(|p| p.to_vec()).collect(),
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    // Responses always emit base64, so the round trip re-enters as base64.
    let body = JsonMarshaler.marshal_infer_response(&reply).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let request_body = format!(
        r#"{{"inputs": [{{"name": "in", "datatype": "BYTES", "shape": [3],
            "parameters": {{"content_type": "base64"}}, "data": {}}}]}}"#,
        value["outputs"][0]["data"]
    );
    let decoded = JsonMarshaler
        .decode_infer_request(request_body.as_bytes())
        .unwrap();
    let round_tripped: Vec<&[u8]> = decoded.inputs[0]
        .contents
        .as_ref()
        .unwrap()
        .bytes_contents
        .iter()
        .map(Vec::as_slice)
        .collect();
    assert_eq!(round_tripped, payloads);
}
