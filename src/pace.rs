use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    time::Duration,
};

/// 一次暫停的結束方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waited {
    /// 暫停時間完整走完
    Elapsed,
    /// 暫停被外部中斷而提前結束
    Interrupted,
}

/// 逐域名更新之間的可中斷暫停。
///
/// 以通道實現：[`Pacer::wait`] 在通道上等待至多一個暫停週期，
/// 期間收到 [`PacerHandle::interrupt`] 的訊號即提前返回。
/// 中斷屬於良性狀況，由呼叫端記錄後繼續，不構成錯誤。
#[derive(Debug)]
pub struct Pacer {
    pause: Duration,
    // 自持一個發送端，保證通道在 Pacer 存活期間不會斷線
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl Pacer {
    /// 以指定的暫停時間建立實例。
    pub fn new(pause: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { pause, tx, rx }
    }

    /// 取得可跨執行緒中斷此暫停的控制柄。
    pub fn handle(&self) -> PacerHandle {
        PacerHandle {
            tx: self.tx.clone(),
        }
    }

    /// 阻塞至多一個暫停週期，返回結束方式。
    pub fn wait(&self) -> Waited {
        match self.rx.recv_timeout(self.pause) {
            Ok(()) => Waited::Interrupted,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Waited::Elapsed,
        }
    }
}

/// [`Pacer`] 的中斷控制柄，可自由複製並移交其他執行緒。
#[derive(Debug, Clone)]
pub struct PacerHandle {
    tx: Sender<()>,
}

impl PacerHandle {
    /// 中斷下一次（或進行中的）暫停。
    pub fn interrupt(&self) {
        let _ = self.tx.send(());
    }
}
