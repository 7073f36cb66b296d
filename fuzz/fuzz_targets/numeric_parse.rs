#![no_main]

use libfuzzer_sys::fuzz_target;
use strand_lib::numeric::{
  self,
  Literal,
  ParseErrorKind,
};

fuzz_target!(|data: &[u8]| {
  let Ok(literal) = std::str::from_utf8(data) else {
    return;
  };

  if let Ok(value) = numeric::to_int(literal)
    && literal != "-0"
  {
    assert_eq!(value.to_string(), literal);
  }

  match numeric::to_float(literal) {
    Ok(value) if value.is_finite() && value != 0.0 => {
      // anything accepted survives a round trip through the shortest rendering
      assert_eq!(value.to_string().parse::<f64>(), Ok(value));
    },
    Err(err) => assert_eq!(err.literal, literal),
    _ => {},
  }

  match numeric::parse(literal) {
    Ok(Literal::Integer(value)) => assert_eq!(numeric::to_int(literal), Ok(value)),
    Ok(Literal::Bool(_)) => assert!(numeric::to_bool(literal).is_ok()),
    Ok(Literal::Float(_)) => assert!(numeric::to_int(literal).is_err()),
    Err(err) if err.kind == ParseErrorKind::InvalidFormat => {
      assert!(numeric::to_float(literal).is_err());
    },
    Err(err) => assert_eq!(err.literal, literal),
  }
});
