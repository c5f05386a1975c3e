use super::*;
use crate::codec::CodecError;
use base64::prelude::*;
use proptest::prelude::*;

fn encode(values: &[i16]) -> String {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    BASE64_STANDARD.encode(bytes)
}

fn document(doc_type: &str, doc_ver: &str, waveforms: &str, extra: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<restingecgdata xmlns="http://www3.medical.philips.com">
  <documentinfo>
    <documentname>test</documentname>
    <documenttype>{doc_type}</documenttype>
    <documentversion>{doc_ver}</documentversion>
  </documentinfo>
  <dataacquisition>
    <signalcharacteristics>
      <samplingrate>500</samplingrate>
      <resolution>5</resolution>
      <acquisitiontype>STD-12</acquisitiontype>
      <numberchannelsallocated>6</numberchannelsallocated>
    </signalcharacteristics>
  </dataacquisition>
  {waveforms}
  {extra}
</restingecgdata>"#
    )
}

/// Six leads of 4 ms at 500 Hz (2 samples each), uncompressed
fn six_lead_document(doc_type: &str, doc_ver: &str, extra: &str) -> String {
    let values: Vec<i16> = vec![
        2, -1, // I
        4, 0, // II
        1, 0, // III
        0, 0, // aVR
        0, 0, // aVL
        0, 0, // aVF
        99, 99, // trailing, ignored
    ];
    let waveforms = format!(
        r#"<parsedwaveforms durationperchannel="4" numberofleads="6" leadlabels="I II III aVR aVL aVF" dataencoding="Base64" compressmethod="Uncompressed">
    {}
  </parsedwaveforms>"#,
        encode(&values)
    );
    document(doc_type, doc_ver, &waveforms, extra)
}

#[test]
fn test_read_uncompressed_document() {
    let ecg = read_str(&six_lead_document("SierraECG", "1.04.01", ""), false).unwrap();

    assert_eq!(ecg.doc_type, "SierraECG");
    assert_eq!(ecg.doc_ver, "1.04.01");
    assert_eq!(ecg.lead_labels(), vec!["I", "II", "III", "aVR", "aVL", "aVF"]);
    assert!(ecg.repbeats.is_empty());

    for lead in &ecg.leads {
        assert_eq!(lead.sampling_freq, 500);
        assert_eq!(lead.duration, 4);
        assert_eq!(lead.len(), 2);
    }

    assert_eq!(ecg.lead("I").unwrap().samples, vec![2, -1]);
    assert_eq!(ecg.lead("II").unwrap().samples, vec![4, 0]);
    // III = II - I - III
    assert_eq!(ecg.lead("III").unwrap().samples, vec![1, 1]);
    // aVR = -aVR - floor((I + II) / 2)
    assert_eq!(ecg.lead("aVR").unwrap().samples, vec![-3, 1]);
    // aVL = floor((I - III) / 2) - aVL
    assert_eq!(ecg.lead("aVL").unwrap().samples, vec![0, -1]);
    // aVF = floor((II + III) / 2) - aVF
    assert_eq!(ecg.lead("aVF").unwrap().samples, vec![2, 0]);
}

#[test]
fn test_read_bytes_matches_read_str() {
    let xml = six_lead_document("PhilipsECG", "1.04", "");
    let from_bytes = read_bytes(xml.as_bytes(), false).unwrap();
    assert_eq!(from_bytes, read_str(&xml, false).unwrap());
}

#[test]
fn test_unsupported_version_aborts() {
    let err = read_str(&six_lead_document("SierraECG", "2.00", ""), false).unwrap_err();
    assert!(err.is_unsupported_format());
    assert_eq!(err.to_string(), "Files of type SierraECG 2.00 are unsupported");
}

#[test]
fn test_missing_root_element() {
    let err = read_str("<other><documentinfo/></other>", false).unwrap_err();
    assert!(matches!(err, SierraError::MissingElement(tag) if tag == "restingecgdata"));
}

#[test]
fn test_missing_parsed_waveforms() {
    let xml = document("PhilipsECG", "1.04", "", "");
    let err = read_str(&xml, false).unwrap_err();
    assert!(matches!(err, SierraError::MissingElement(tag) if tag == "parsedwaveforms"));
}

#[test]
fn test_synthesized_labels_and_generic_channels() {
    let waveforms = format!(
        r#"<parsedwaveforms durationperchannel="2" dataencoding="Base64">{}</parsedwaveforms>"#,
        encode(&[1; 6])
    );
    let xml = document("SierraECG", "1.03", &waveforms, "");
    let ecg = read_str(&xml, false).unwrap();
    assert_eq!(ecg.lead_labels(), vec!["I", "II", "III", "aVR", "aVL", "aVF"]);
    assert_eq!(ecg.lead("I").unwrap().samples, vec![1]);
    // 1 - 1 - 1
    assert_eq!(ecg.lead("III").unwrap().samples, vec![-1]);
}

#[test]
fn test_oversized_channel_count_is_rejected() {
    let waveforms = r#"<parsedwaveforms durationperchannel="0" dataencoding="Base64"></parsedwaveforms>"#;
    let xml = document("SierraECG", "1.03", waveforms, "")
        .replace("<numberchannelsallocated>6<", "<numberchannelsallocated>50000000<");
    let err = read_str(&xml, false).unwrap_err();
    assert!(matches!(
        err,
        SierraError::InvalidValue { ref field, .. } if field == "numberchannelsallocated"
    ));
}

#[test]
fn test_fewer_than_six_leads_skip_derivation() {
    let waveforms = format!(
        r#"<parsedwaveforms durationperchannel="6" numberofleads="2" leadlabels="I II" dataencoding="Base64">{}</parsedwaveforms>"#,
        encode(&(1..=12).collect::<Vec<i16>>())
    );
    let ecg = read_str(&document("SierraECG", "1.04", &waveforms, ""), false).unwrap();
    assert_eq!(ecg.leads.len(), 2);
    assert_eq!(ecg.leads[0].samples, vec![1, 2, 3]);
    assert_eq!(ecg.leads[1].samples, vec![4, 5, 6]);
}

#[test]
fn test_unsupported_payload_encoding() {
    let waveforms =
        r#"<parsedwaveforms durationperchannel="4" numberofleads="1" leadlabels="I" dataencoding="Base85">xx</parsedwaveforms>"#;
    let err = read_str(&document("SierraECG", "1.04", waveforms, ""), false).unwrap_err();
    assert!(matches!(err, SierraError::UnsupportedEncoding(ref value) if value == "Base85"));
    assert!(err.is_unsupported_format());
}

#[test]
fn test_unsupported_compression() {
    let waveforms = format!(
        r#"<parsedwaveforms durationperchannel="2" numberofleads="1" leadlabels="I" dataencoding="Base64" compression="Huffman">{}</parsedwaveforms>"#,
        encode(&[1])
    );
    let err = read_str(&document("SierraECG", "1.04", &waveforms, ""), false).unwrap_err();
    assert!(matches!(err, SierraError::UnsupportedCompression(ref value) if value == "Huffman"));
}

#[test]
fn test_stub_codec_is_used_for_xli() {
    let waveforms = r#"<parsedwaveforms durationperchannel="4" numberofleads="6" leadlabels="I II III aVR aVL aVF" dataencoding="Base64" compressmethod="XLI">AAAA</parsedwaveforms>"#;
    let xml = document("PhilipsECG", "1.04.02", waveforms, "");

    let codec = |raw: &[u8], labels: &[String]| -> Result<Vec<Vec<i16>>, CodecError> {
        assert_eq!(raw, [0u8, 0, 0].as_slice());
        Ok(labels.iter().map(|_| vec![2, 2]).collect())
    };
    let ecg = SierraReader::with_codec(codec).read_str(&xml).unwrap();

    assert_eq!(ecg.leads.len(), 6);
    assert_eq!(ecg.lead("I").unwrap().samples, vec![2, 2]);
    // derivation still runs over codec output: III = 2 - 2 - 2
    assert_eq!(ecg.lead("III").unwrap().samples, vec![-2, -2]);
}

#[test]
fn test_codec_failure_propagates() {
    let waveforms = r#"<parsedwaveforms durationperchannel="4" numberofleads="1" leadlabels="I" dataencoding="Base64" compressmethod="XLI">AAAA</parsedwaveforms>"#;
    let xml = document("PhilipsECG", "1.04.02", waveforms, "");

    let codec = |_: &[u8], _: &[String]| -> Result<Vec<Vec<i16>>, CodecError> {
        Err(CodecError::Custom("corrupt".to_string()))
    };
    let err = SierraReader::with_codec(codec).read_str(&xml).unwrap_err();
    assert!(matches!(err, SierraError::CodecError(_)));
}

#[test]
fn test_repbeats_only_when_requested() {
    let repbeats = format!(
        r#"<repbeats dataencoding="Base64" samplespersec="500" resolution="5" repbeatmethod="median">
    <repbeat leadname="I"><waveform duration="1200">{}</waveform></repbeat>
    <repbeat leadname="II"><waveform duration="1200">{}</waveform></repbeat>
  </repbeats>"#,
        encode(&[1, 2, 3]),
        encode(&[4, 5])
    );
    let xml = six_lead_document("SierraECG", "1.04", &repbeats);

    let without = read_str(&xml, false).unwrap();
    assert!(without.repbeats.is_empty());

    let with = read_str(&xml, true).unwrap();
    assert_eq!(with.repbeats.len(), 2);
    assert_eq!(with.repbeat("I").unwrap().samples, vec![1, 2, 3]);
    assert_eq!(with.repbeat("II").unwrap().method, "median");
    assert_eq!(with.leads, without.leads);
}

#[test]
fn test_repbeats_absent_yields_empty_map() {
    let ecg = read_str(&six_lead_document("SierraECG", "1.03", ""), true).unwrap();
    assert!(ecg.repbeats.is_empty());
}

#[test]
fn test_inline_repbeats_1_03() {
    let repbeats = format!(
        r#"<repbeats dataencoding="Base64"><repbeat leadname="V1" duration="1000">{}</repbeat></repbeats>"#,
        encode(&[-5, 5])
    );
    let ecg = read_str(&six_lead_document("SierraECG", "1.03", &repbeats), true).unwrap();
    let beat = ecg.repbeat("V1").unwrap();
    assert_eq!(beat.sampling_freq, 0);
    assert_eq!(beat.duration, 1000);
    assert_eq!(beat.samples, vec![-5, 5]);
}

#[test]
fn test_repbeat_failure_aborts_read() {
    let repbeats = r#"<repbeats dataencoding="Hex"><repbeat leadname="I" duration="1">00</repbeat></repbeats>"#;
    let xml = six_lead_document("SierraECG", "1.04", repbeats);
    assert!(read_str(&xml, false).is_ok());
    assert!(matches!(
        read_str(&xml, true),
        Err(SierraError::UnsupportedEncoding(_))
    ));
}

#[test]
fn test_read_document_accepts_parsed_tree() {
    let tree = XmlElement::parse_str(&six_lead_document("PhilipsECG", "1.04.02", "")).unwrap();
    let ecg = SierraReader::new().read_document(&tree).unwrap();
    assert_eq!(ecg.doc_type, "PhilipsECG");

    let wrapped = XmlElement::new("archive").with_child(tree);
    let ecg = SierraReader::new().read_document(&wrapped).unwrap();
    assert_eq!(ecg.leads.len(), 6);
}

proptest! {
    #[test]
    fn prop_block_split(lead_count in 1usize..8, sample_count in 0usize..32, extra in 0usize..16) {
        let total = lead_count * sample_count + extra;
        let values: Vec<i16> = (0..total).map(|v| v as i16).collect();
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();

        let leads = BinaryDecoder::split_leads(&bytes, lead_count, sample_count).unwrap();
        prop_assert_eq!(leads.len(), lead_count);
        for (index, lead) in leads.iter().enumerate() {
            prop_assert_eq!(lead.as_slice(), &values[index * sample_count..(index + 1) * sample_count]);
        }
    }

    #[test]
    fn prop_sample_count_law(duration in 0u32..10_000, rate in 1u32..1_000) {
        let expected = (duration as u64 * rate as u64 / 1000) as usize;
        prop_assert_eq!(sample_count(duration, rate), expected);

        let values = vec![0i16; expected * 2];
        let waveforms = XmlElement::new("parsedwaveforms")
            .with_attribute("dataencoding", "Base64")
            .with_text(encode(&values));
        let labels = vec!["I".to_string(), "II".to_string()];
        let no_codec = |_: &[u8], _: &[String]| -> Result<Vec<Vec<i16>>, CodecError> { unreachable!() };
        let leads = decode_waveforms(&waveforms, &labels, expected, &no_codec).unwrap();
        for lead in leads {
            prop_assert_eq!(lead.len(), expected);
        }
    }
}
