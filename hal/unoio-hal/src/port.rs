//! Pin routing
//!
//! Maps the Arduino Uno pin numbers printed on the board to the
//! ATmega328P I/O port and bit that drive them:
//!
//! | Board pins | Port | Bit        |
//! |------------|------|------------|
//! | 0 - 7      | D    | pin        |
//! | 8 - 13     | B    | pin - 8    |
//! | A0 - A5    | C    | pin - 14   |

/// Highest routable pin number (A5)
pub const MAX_PIN: u8 = 19;

/// I/O port (bank of eight bits) on the ATmega328P
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// Port B (pins 8 - 13)
    B,
    /// Port C (pins A0 - A5)
    C,
    /// Port D (pins 0 - 7)
    D,
}

impl Port {
    /// Pin-change interrupt group serving this port
    ///
    /// Doubles as the PCIEn bit in PCICR and selects PCMSKn.
    pub const fn interrupt_group(self) -> u8 {
        match self {
            Port::B => 0,
            Port::C => 1,
            Port::D => 2,
        }
    }
}

/// Resolve a board pin number to its port and bit
///
/// Out-of-range pins resolve to `(None, 0)`, the unbound sentinel.
/// Devices built on an unbound route never touch hardware.
pub const fn route(pin: u8) -> (Option<Port>, u8) {
    match pin {
        0..=7 => (Some(Port::D), pin),
        8..=13 => (Some(Port::B), pin - 8),
        14..=19 => (Some(Port::C), pin - 14),
        _ => (None, 0),
    }
}

/// Named board pins
///
/// Mirrors the silkscreen of the Uno so call sites can write
/// `pins::A0` instead of `14`. Pins can also be named by port bit
/// (`B5` is D13, `C0` is A0); port D bits coincide with `D0` - `D7`.
pub mod pins {
    pub const D0: u8 = 0;
    pub const D1: u8 = 1;
    pub const D2: u8 = 2;
    pub const D3: u8 = 3;
    pub const D4: u8 = 4;
    pub const D5: u8 = 5;
    pub const D6: u8 = 6;
    pub const D7: u8 = 7;
    pub const D8: u8 = 8;
    pub const D9: u8 = 9;
    pub const D10: u8 = 10;
    pub const D11: u8 = 11;
    pub const D12: u8 = 12;
    pub const D13: u8 = 13;
    pub const A0: u8 = 14;
    pub const A1: u8 = 15;
    pub const A2: u8 = 16;
    pub const A3: u8 = 17;
    pub const A4: u8 = 18;
    pub const A5: u8 = 19;

    pub const B0: u8 = 8;
    pub const B1: u8 = 9;
    pub const B2: u8 = 10;
    pub const B3: u8 = 11;
    pub const B4: u8 = 12;
    pub const B5: u8 = 13;

    pub const C0: u8 = 14;
    pub const C1: u8 = 15;
    pub const C2: u8 = 16;
    pub const C3: u8 = 17;
    pub const C4: u8 = 18;
    pub const C5: u8 = 19;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_port_boundaries() {
        assert_eq!(route(0), (Some(Port::D), 0));
        assert_eq!(route(7), (Some(Port::D), 7));
        assert_eq!(route(8), (Some(Port::B), 0));
        assert_eq!(route(13), (Some(Port::B), 5));
        assert_eq!(route(14), (Some(Port::C), 0));
        assert_eq!(route(19), (Some(Port::C), 5));
        assert_eq!(route(20), (None, 0));
        assert_eq!(route(u8::MAX), (None, 0));
    }

    #[test]
    fn test_named_pins() {
        assert_eq!(route(pins::D13), (Some(Port::B), 5));
        assert_eq!(route(pins::A0), (Some(Port::C), 0));
        assert_eq!(route(pins::D2), (Some(Port::D), 2));
    }

    #[test]
    fn test_port_bit_aliases() {
        let b = [pins::B0, pins::B1, pins::B2, pins::B3, pins::B4, pins::B5];
        let c = [pins::C0, pins::C1, pins::C2, pins::C3, pins::C4, pins::C5];
        for bit in 0..6u8 {
            assert_eq!(route(b[bit as usize]), (Some(Port::B), bit));
            assert_eq!(route(c[bit as usize]), (Some(Port::C), bit));
        }
        assert_eq!(pins::B5, pins::D13);
        assert_eq!(pins::C0, pins::A0);
    }

    #[test]
    fn test_interrupt_groups() {
        assert_eq!(Port::B.interrupt_group(), 0);
        assert_eq!(Port::C.interrupt_group(), 1);
        assert_eq!(Port::D.interrupt_group(), 2);
    }

    proptest! {
        #[test]
        fn route_is_total(pin in any::<u8>()) {
            let (port, bit) = route(pin);
            match pin {
                0..=7 => prop_assert_eq!((port, bit), (Some(Port::D), pin)),
                8..=13 => prop_assert_eq!((port, bit), (Some(Port::B), pin - 8)),
                14..=19 => prop_assert_eq!((port, bit), (Some(Port::C), pin - 14)),
                _ => prop_assert_eq!((port, bit), (None, 0)),
            }
        }

        #[test]
        fn bound_bits_fit_in_a_port(pin in 0u8..=MAX_PIN) {
            let (port, bit) = route(pin);
            prop_assert!(port.is_some());
            prop_assert!(bit < 8);
        }
    }
}
