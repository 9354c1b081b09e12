//! Bus interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait the framebuffer
//! engine writes through, plus ready-made transports for the two ways these
//! panels are wired: [`Spi4Wire`] ("4-wire" SPI with a data/command line)
//! and [`I2cInterface`] (I2C with a control-byte prefix).
//!
//! The engine only ever needs two operations: send a command sequence and
//! send a data payload. Scheduling, queuing and timing of the physical
//! transfer are entirely the transport's concern; sends happen in program
//! order and a fault is reported back unmodified.
//!
//! ## Example
//!
//! ```rust,no_run
//! use uc1701::{DisplayInterface, Spi4Wire};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut interface = Spi4Wire::new(MockSpi, MockPin);
//!
//! // Point the write pointer at page 0, column 0, then send two data bytes.
//! let _ = interface.send_commands(&[0xB0, 0x10, 0x00]);
//! let _ = interface.send_data(&[0xFF, 0x81]);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;

use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

/// Abstract command/data sender consumed by the framebuffer engine
///
/// Implement this to route the engine's writes over a custom bus (a
/// microcontroller bridge, a test recorder, a queued scheduler). The two
/// send methods carry the same bytes a hardware transport would see; only
/// the command/data tagging differs between them.
pub trait DisplayInterface {
    /// Error type for transport operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command/addressing byte sequence
    ///
    /// # Errors
    ///
    /// Returns an error on a transport fault.
    fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error>;

    /// Send a display-data payload
    ///
    /// # Errors
    ///
    /// Returns an error on a transport fault.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Perform the panel reset sequence, if the transport has a reset line
    ///
    /// The default does nothing; transports with a reset pin drive it low,
    /// wait, drive it high, wait, then hold through a settle period.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        let _ = delay;
    }
}

/// Errors from the bundled hardware transports
///
/// Generic over the bus and pin error types.
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// Bus communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// Duration of each phase of the reset sequence: low, high, settle.
const RESET_PHASE_MS: u32 = 100;

/// Placeholder reset pin for transports wired without one.
///
/// Both pin writes succeed and do nothing.
#[derive(Debug, Clone, Copy)]
pub struct NoReset;

impl embedded_hal::digital::ErrorType for NoReset {
    type Error = Infallible;
}

impl OutputPin for NoReset {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// "4-wire" SPI transport: SPI bus plus a data/command select line
///
/// The DC pin is driven low before command bytes and high before data
/// bytes, matching how all three supported controllers are strapped for
/// serial operation.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/command select pin implementing [`OutputPin`]
/// * `RST` - Optional reset pin implementing [`OutputPin`]
pub struct Spi4Wire<SPI, DC, RST = NoReset> {
    /// SPI device for communication
    spi: SPI,
    /// Data/command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low), if wired
    rst: Option<RST>,
}

impl<SPI, DC> Spi4Wire<SPI, DC, NoReset> {
    /// Create a transport without a reset line
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc, rst: None }
    }
}

impl<SPI, DC, RST> Spi4Wire<SPI, DC, RST> {
    /// Create a transport with a reset line
    pub fn with_reset(spi: SPI, dc: DC, rst: RST) -> Self {
        Self {
            spi,
            dc,
            rst: Some(rst),
        }
    }
}

impl<SPI, DC, RST> DisplayInterface for Spi4Wire<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin,
    DC::Error: Debug,
    RST: OutputPin,
{
    type Error = InterfaceError<SPI::Error, DC::Error>;

    fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(cmds).map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        if let Some(rst) = self.rst.as_mut() {
            let _ = rst.set_low();
            delay.delay_ms(RESET_PHASE_MS);
            let _ = rst.set_high();
            delay.delay_ms(RESET_PHASE_MS);
            // Hold high through a settle period before any commands follow.
            let _ = rst.set_high();
            delay.delay_ms(RESET_PHASE_MS);
        }
    }
}

/// Default 7-bit I2C address of SSD1306/SH1106 modules.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Control byte announcing a command sequence.
const CONTROL_COMMANDS: u8 = 0x00;

/// Control byte announcing display data.
const CONTROL_DATA: u8 = 0x40;

/// I2C transport for the SSD1306 family
///
/// Every transfer is prefixed with the control byte that tags the rest of
/// the frame as commands (0x00) or data (0x40).
pub struct I2cInterface<I2C, RST = NoReset> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
    /// Reset pin (active low), if wired
    rst: Option<RST>,
}

impl<I2C> I2cInterface<I2C, NoReset> {
    /// Create a transport at the default address, without a reset line
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Create a transport at a specific address, without a reset line
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            rst: None,
        }
    }
}

impl<I2C, RST> I2cInterface<I2C, RST> {
    /// Create a transport with a reset line
    pub fn with_reset(i2c: I2C, address: u8, rst: RST) -> Self {
        Self {
            i2c,
            address,
            rst: Some(rst),
        }
    }
}

impl<I2C, RST> I2cInterface<I2C, RST>
where
    I2C: I2c,
{
    fn write_framed(&mut self, control: u8, bytes: &[u8]) -> Result<(), I2C::Error> {
        let mut framed = Vec::with_capacity(bytes.len() + 1);
        framed.push(control);
        framed.extend_from_slice(bytes);
        self.i2c.write(self.address, &framed)
    }
}

impl<I2C, RST> DisplayInterface for I2cInterface<I2C, RST>
where
    I2C: I2c,
    I2C::Error: Debug,
    RST: OutputPin,
{
    type Error = I2C::Error;

    fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error> {
        self.write_framed(CONTROL_COMMANDS, cmds)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.write_framed(CONTROL_DATA, data)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        if let Some(rst) = self.rst.as_mut() {
            let _ = rst.set_low();
            delay.delay_ms(RESET_PHASE_MS);
            let _ = rst.set_high();
            delay.delay_ms(RESET_PHASE_MS);
            let _ = rst.set_high();
            delay.delay_ms(RESET_PHASE_MS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Dc(bool),
        Rst(bool),
        Write(Vec<u8>),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug)]
    struct SharedSpi(Log);

    impl embedded_hal::spi::ErrorType for SharedSpi {
        type Error = Infallible;
    }

    impl SpiDevice for SharedSpi {
        fn transaction(
            &mut self,
            operations: &mut [embedded_hal::spi::Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            for op in operations.iter() {
                if let embedded_hal::spi::Operation::Write(bytes) = op {
                    self.0.borrow_mut().push(Event::Write(bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[derive(Debug)]
    struct SharedPin {
        log: Log,
        kind: fn(bool) -> Event,
    }

    impl embedded_hal::digital::ErrorType for SharedPin {
        type Error = Infallible;
    }

    impl OutputPin for SharedPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push((self.kind)(false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push((self.kind)(true));
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn spi_fixture() -> (Log, Spi4Wire<SharedSpi, SharedPin, SharedPin>) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let spi = SharedSpi(Rc::clone(&log));
        let dc = SharedPin {
            log: Rc::clone(&log),
            kind: Event::Dc,
        };
        let rst = SharedPin {
            log: Rc::clone(&log),
            kind: Event::Rst,
        };
        (log.clone(), Spi4Wire::with_reset(spi, dc, rst))
    }

    #[test]
    fn test_spi_drives_dc_before_each_transfer() {
        let (log, mut interface) = spi_fixture();
        interface.send_commands(&[0xB0, 0x10, 0x00]).unwrap();
        interface.send_data(&[0xFF, 0x81]).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                Event::Dc(false),
                Event::Write(vec![0xB0, 0x10, 0x00]),
                Event::Dc(true),
                Event::Write(vec![0xFF, 0x81]),
            ]
        );
    }

    #[test]
    fn test_spi_reset_pulses_low_then_holds_high() {
        let (log, mut interface) = spi_fixture();
        let mut delay = MockDelay::default();
        interface.reset(&mut delay);

        assert_eq!(
            *log.borrow(),
            vec![Event::Rst(false), Event::Rst(true), Event::Rst(true)]
        );
        assert_eq!(delay.total_ns, 300_000_000);
    }

    #[test]
    fn test_spi_without_reset_line_is_a_no_op() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let spi = SharedSpi(Rc::clone(&log));
        let dc = SharedPin {
            log: Rc::clone(&log),
            kind: Event::Dc,
        };
        let mut interface = Spi4Wire::new(spi, dc);
        let mut delay = MockDelay::default();
        interface.reset(&mut delay);

        assert!(log.borrow().is_empty());
        assert_eq!(delay.total_ns, 0);
    }

    #[derive(Debug, Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
    }

    impl embedded_hal::i2c::ErrorType for MockI2c {
        type Error = Infallible;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [embedded_hal::i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations.iter() {
                if let embedded_hal::i2c::Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_i2c_prefixes_the_control_byte() {
        let mut interface = I2cInterface::new(MockI2c::default());
        interface.send_commands(&[0xAE, 0xAF]).unwrap();
        interface.send_data(&[0x0F, 0xF0]).unwrap();

        assert_eq!(
            interface.i2c.writes,
            vec![
                (DEFAULT_I2C_ADDRESS, vec![0x00, 0xAE, 0xAF]),
                (DEFAULT_I2C_ADDRESS, vec![0x40, 0x0F, 0xF0]),
            ]
        );
    }

    #[test]
    fn test_i2c_honors_a_custom_address() {
        let mut interface = I2cInterface::with_address(MockI2c::default(), 0x3D);
        interface.send_commands(&[0xAE]).unwrap();
        assert_eq!(interface.i2c.writes, vec![(0x3D, vec![0x00, 0xAE])]);
    }
}
