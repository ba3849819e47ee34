//! Serial transport abstraction
//!
//! The sensor board is attached over an asynchronous byte-oriented serial
//! link. This trait covers exactly the operations the session needs; it
//! can be implemented by hardware UARTs, software serial ports, or test
//! doubles.

/// Byte-oriented serial transport to the sensor board.
///
/// Implementations are expected to buffer received bytes internally:
/// [`SerialLink::available`] reports how many are waiting, and
/// [`SerialLink::read_byte`] should only be called when at least one is.
/// Overflow of that receive buffer is outside the session's control; the
/// caller must poll often enough to drain it.
pub trait SerialLink {
    /// Error type for transport operations
    type Error;

    /// Open the transport at the given baud rate.
    fn open(&mut self, baud: u32) -> Result<(), Self::Error>;

    /// Close the transport. Pending receive data may be discarded.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// Number of received bytes waiting to be read.
    fn available(&self) -> usize;

    /// Read a single received byte.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Write data to the transport.
    ///
    /// Blocks until all data has been accepted or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered transmit data out of the port.
    ///
    /// Must complete before the port is closed for a link-speed change;
    /// not every implementation flushes on close.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

impl<T: SerialLink + ?Sized> SerialLink for &mut T {
    type Error = T::Error;

    fn open(&mut self, baud: u32) -> Result<(), Self::Error> {
        (**self).open(baud)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }

    fn available(&self) -> usize {
        (**self).available()
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).read_byte()
    }

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_blocking(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}
