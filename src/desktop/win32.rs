use super::{Desktop, PicturePosition};
use crate::{Error, Resolution, Result};
use std::ffi::c_void;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use tracing::debug;
use windows::core::{w, PCWSTR};
use windows::Win32::System::Registry::{
    RegCloseKey, RegOpenKeyExW, RegSetValueExW, HKEY, HKEY_CURRENT_USER, KEY_SET_VALUE, REG_SZ,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SystemParametersInfoW, SM_CXSCREEN, SM_CYSCREEN, SPIF_SENDCHANGE,
    SPIF_UPDATEINIFILE, SPI_SETDESKWALLPAPER,
};

/// Windows desktop through the registry and `SystemParametersInfoW`.
#[derive(Debug, Default)]
pub struct Win32;

/// `HKCU\Control Panel\Desktop`, open for writing until dropped.
struct DesktopKey(HKEY);

impl DesktopKey {
    fn open() -> Result<Self> {
        let mut hkey = HKEY::default();
        unsafe {
            RegOpenKeyExW(
                HKEY_CURRENT_USER,
                w!("Control Panel\\Desktop"),
                0,
                KEY_SET_VALUE,
                &mut hkey,
            )
        }
        .ok()
        .map_err(|e| Error::Desktop(format!("RegOpenKeyExW failed: {}", e)))?;

        Ok(Self(hkey))
    }

    fn set(&self, name: PCWSTR, value: &str) -> Result<()> {
        let data: Vec<u8> = to_utf16(value.as_ref())
            .into_iter()
            .flat_map(|u| u.to_le_bytes())
            .collect();

        unsafe { RegSetValueExW(self.0, name, 0, REG_SZ, Some(&data)) }
            .ok()
            .map_err(|e| Error::Desktop(format!("RegSetValueExW failed: {}", e)))
    }
}

impl Drop for DesktopKey {
    fn drop(&mut self) {
        unsafe {
            let _ = RegCloseKey(self.0);
        }
    }
}

fn to_utf16(s: &std::ffi::OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}

impl Desktop for Win32 {
    fn primary_resolution(&self) -> Option<Resolution> {
        let (width, height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };

        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(width), Ok(height)) if width > 0 && height > 0 => {
                Some(Resolution::new(width, height))
            }
            _ => None,
        }
    }

    fn set_style(&self, position: PicturePosition) -> Result<()> {
        let (picture_position, tile_wallpaper) = position.registry_values();
        debug!(picture_position, tile_wallpaper, "writing wallpaper style");

        let key = DesktopKey::open()?;
        key.set(w!("PicturePosition"), picture_position)?;
        key.set(w!("TileWallpaper"), tile_wallpaper)?;

        Ok(())
    }

    fn apply_wallpaper(&self, path: &Path) -> Result<()> {
        let mut wide = to_utf16(path.as_os_str());

        unsafe {
            SystemParametersInfoW(
                SPI_SETDESKWALLPAPER,
                0,
                Some(wide.as_mut_ptr() as *mut c_void),
                SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
            )
        }
        .map_err(|e| Error::Desktop(format!("SystemParametersInfoW failed: {}", e)))
    }
}
