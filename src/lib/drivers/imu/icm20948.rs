// ICM-20948 IMU driver, yaw-rate only
// Datasheet: https://invensense.tdk.com/wp-content/uploads/2021/10/DS-000189-ICM-20948-v1.5.pdf

pub use crate::drivers::imu::icm20948_constants::*;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::OutputPin;

// Error codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    ParamError,
    SpiError,
    WrongID,
    CSError,
}

struct SpiWrapper<SPI, CS> {
    spi_bus: SPI,
    cs: CS,
}

impl<SPI, CS> SpiWrapper<SPI, CS>
where
    SPI: Write<u8> + Transfer<u8>,
    CS: OutputPin,
{
    fn transfer<'a>(&mut self, data: &'a mut [u8]) -> Result<&'a [u8], ErrorCode> {
        self.cs.set_low().map_err(|_| ErrorCode::CSError)?;
        let res = self.spi_bus.transfer(data);
        self.cs.set_high().map_err(|_| ErrorCode::CSError)?;
        match res {
            Ok(read_data) => Ok(&read_data[1..]),
            Err(_) => Err(ErrorCode::SpiError),
        }
    }
}

pub struct ICM20948<SPI, CS> {
    spi: SpiWrapper<SPI, CS>,
    curr_bank: u8,
    gyro_fss: GyroFullScaleSel,
}

impl<SPI, CS> ICM20948<SPI, CS>
where
    SPI: Write<u8> + Transfer<u8>,
    CS: OutputPin,
{
    pub fn new(spi_bus: SPI, cs: CS) -> Self {
        Self {
            spi: SpiWrapper { spi_bus, cs },
            curr_bank: 255,
            gyro_fss: GyroFullScaleSel::Dps250,
        }
    }

    pub fn init<D: DelayMs<u32>>(
        &mut self,
        delay: &mut D,
        gyro_fss_config: GyroFullScaleSel,
        gyro_dlpf_config: GyroDLPFSel,
    ) -> Result<(), ErrorCode> {
        self.check_id()?;
        self.sw_reset()?;
        delay.delay_ms(10);
        // reset puts the bank select back to 0
        self.curr_bank = 255;
        self.wake()?;
        self.config_gyro(gyro_fss_config, gyro_dlpf_config)?;
        Ok(())
    }

    pub fn data_ready(&mut self) -> Result<bool, ErrorCode> {
        self.set_bank(0)?;
        let data_ready = self.read_byte(RegAddrBank0::IntStatus1 as u8)?;
        Ok((data_ready & 0x01) == 1)
    }

    // z-component of angular velocity in degrees per second
    pub fn read_gyro_z(&mut self) -> Result<f32, ErrorCode> {
        self.set_bank(0)?;
        let mut bytes = [RegAddrBank0::GyroZoutH as u8, 0, 0];
        let buf = self.read_bytes(&mut bytes[..])?;
        let raw = i16::from_be_bytes([buf[0], buf[1]]);
        Ok(raw as f32 / self.gyro_fss.sensitivity())
    }

    fn check_id(&mut self) -> Result<(), ErrorCode> {
        self.set_bank(0)?;
        let whoami = self.read_byte(RegAddrBank0::WhoAmI as u8)?;
        if whoami != ICM_20948_WHO_AM_I {
            Err(ErrorCode::WrongID)
        } else {
            Ok(())
        }
    }

    fn sw_reset(&mut self) -> Result<(), ErrorCode> {
        self.set_bank(0)?;
        let reg = self.read_byte(RegAddrBank0::PwrMgmt1 as u8)?;
        self.write_byte(
            RegAddrBank0::PwrMgmt1 as u8,
            reg | PwrMgmt1Bits::DeviceReset as u8,
        )
    }

    // out of sleep and low power, best available clock
    fn wake(&mut self) -> Result<(), ErrorCode> {
        self.set_bank(0)?;
        let mut reg = self.read_byte(RegAddrBank0::PwrMgmt1 as u8)?;
        reg &= !(PwrMgmt1Bits::Sleep as u8 | PwrMgmt1Bits::LPEnable as u8);
        reg |= PwrMgmt1Bits::ClkSelAuto as u8;
        self.write_byte(RegAddrBank0::PwrMgmt1 as u8, reg)
    }

    fn config_gyro(
        &mut self,
        fss_config: GyroFullScaleSel,
        dlpf_config: GyroDLPFSel,
    ) -> Result<(), ErrorCode> {
        self.set_bank(2)?;
        let mut config = self.read_byte(RegAddrBank2::GyroConfig1 as u8)?;

        // Configure DLPF
        if matches!(dlpf_config, GyroDLPFSel::Disable) {
            config &= !(GyroConfig1Bits::GyroFChoice as u8);
        } else {
            config &= !(GyroConfig1Bits::GyroDLPFCFG as u8);
            config |= ((dlpf_config as u8) << 3) | (GyroConfig1Bits::GyroFChoice as u8);
        }

        // Configure FS
        config &= !(GyroConfig1Bits::GyroFSSel as u8);
        config |= (fss_config as u8) << 1;

        self.write_byte(RegAddrBank2::GyroConfig1 as u8, config)?;
        // 1.1 kHz / (1 + 10) = 100 Hz output rate
        self.write_byte(RegAddrBank2::GyroSmplrtDiv as u8, 10)?;
        self.gyro_fss = fss_config;
        Ok(())
    }

    fn set_bank(&mut self, bank: u8) -> Result<(), ErrorCode> {
        if bank > 3 {
            Err(ErrorCode::ParamError)
        } else if self.curr_bank == bank {
            Ok(())
        } else {
            self.write_byte(RegAddrGeneral::BankSel as u8, (bank << 4) & 0x30)?;
            self.curr_bank = bank;
            Ok(())
        }
    }

    fn write_byte(&mut self, reg: u8, data: u8) -> Result<(), ErrorCode> {
        let mut bytes = [reg, data];
        self.spi.transfer(&mut bytes[..]).map(|_| ())
    }

    fn read_byte(&mut self, reg: u8) -> Result<u8, ErrorCode> {
        let mut bytes = [reg | 0x80, 0];
        let data = self.spi.transfer(&mut bytes[..])?;
        Ok(data[0])
    }

    fn read_bytes<'a>(&mut self, data: &'a mut [u8]) -> Result<&'a [u8], ErrorCode> {
        data[0] |= 0x80;
        self.spi.transfer(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    // single flat register file, banks ignored
    struct FakeSpi {
        regs: [u8; 128],
    }

    impl Transfer<u8> for FakeSpi {
        type Error = Infallible;

        fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], Infallible> {
            let addr = (words[0] & 0x7F) as usize;
            if words[0] & 0x80 != 0 {
                for (i, w) in words[1..].iter_mut().enumerate() {
                    *w = self.regs[addr + i];
                }
            } else {
                self.regs[addr] = words[1];
            }
            Ok(words)
        }
    }

    impl Write<u8> for FakeSpi {
        type Error = Infallible;

        fn write(&mut self, _words: &[u8]) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct FakeCs;

    impl OutputPin for FakeCs {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayMs<u32> for NoDelay {
        fn delay_ms(&mut self, _ms: u32) {}
    }

    fn imu(whoami: u8) -> ICM20948<FakeSpi, FakeCs> {
        let mut regs = [0; 128];
        regs[RegAddrBank0::WhoAmI as usize] = whoami;
        ICM20948::new(FakeSpi { regs }, FakeCs)
    }

    #[test]
    fn rejects_other_parts() {
        let mut imu = imu(0x12);
        assert_eq!(
            imu.init(&mut NoDelay, GyroFullScaleSel::Dps250, GyroDLPFSel::Disable),
            Err(ErrorCode::WrongID)
        );
    }

    #[test]
    fn scales_yaw_rate_by_full_scale() {
        let mut imu = imu(ICM_20948_WHO_AM_I);
        imu.init(&mut NoDelay, GyroFullScaleSel::Dps500, GyroDLPFSel::D51bw2N73bw3)
            .unwrap();
        let sleep = imu.spi.spi_bus.regs[RegAddrBank0::PwrMgmt1 as usize] & PwrMgmt1Bits::Sleep as u8;
        assert_eq!(sleep, 0);

        // -131 raw
        let raw = (-131i16).to_be_bytes();
        imu.spi.spi_bus.regs[RegAddrBank0::GyroZoutH as usize] = raw[0];
        imu.spi.spi_bus.regs[RegAddrBank0::GyroZoutH as usize + 1] = raw[1];
        let rate = imu.read_gyro_z().unwrap();
        assert!((rate - (-131.0 / 65.5)).abs() < 1e-4);
    }
}
