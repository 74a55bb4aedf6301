#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the supply-voltage conversion.

use xmas_lights::Error;
use xmas_lights::voltage::Millivolts;

#[test]
fn calibration_points_convert() {
    assert_eq!(Millivolts::from_raw(700), Millivolts(12_200));
    assert_eq!(Millivolts::from_raw(270), Millivolts(4_705));
    assert_eq!(Millivolts::from_raw(0), Millivolts(0));
    // Top of a 10-bit reading.
    assert_eq!(Millivolts::from_raw(1023), Millivolts(17_830));
}

#[test]
fn displays_volts_with_two_decimals() {
    assert_eq!(Millivolts(12_200).to_string(), "12.20V");
    assert_eq!(Millivolts(4_705).to_string(), "4.70V");
    assert_eq!(Millivolts(50).to_string(), "0.05V");
}

#[test]
fn to_text_fits_or_reports_capacity() {
    let text = Millivolts(4_705).to_text::<8>().unwrap();
    assert_eq!(text.as_str(), "4.70V");

    let err = Millivolts(12_200).to_text::<4>().unwrap_err();
    assert!(matches!(err, Error::TextCapacity { capacity: 4 }));
    assert_eq!(err.to_string(), "text does not fit in 4 bytes");
}
